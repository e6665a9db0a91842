pub mod advice_panel;
pub mod code_diff;
pub mod file_list;
pub mod header;
pub mod log_modal;
pub mod mode_toggle;
pub mod progress_bar;
pub mod prompt_modal;
pub mod settings_panel;
pub mod test_panel;
pub mod upload_area;
