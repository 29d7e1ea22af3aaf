pub mod clipboard;
pub mod highlight;
pub mod markdown;
pub mod render;
pub mod sanitize;
pub mod scanner;

pub use clipboard::copy_to_clipboard;
pub use render::{
    render_banner, render_editor, render_error, render_language_list, render_panel,
    render_result, render_toolbar, RenderOptions,
};
pub use scanner::Scanner;
