//! punchkiosk entrypoint.

use punchkiosk::run;
use punchkiosk::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
