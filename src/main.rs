use feedpaws_web::{navigator, SiteConfig};
use log::Level;

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(Level::Debug) {
        web_sys::console::error_1(&format!("logger unavailable: {}", e).into());
    }

    let config = SiteConfig::load();
    navigator::start(&config);
}
