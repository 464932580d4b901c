//! rRaid main entrypoint.

use rraid::run;
use rraid::ui::messages;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        messages::report(&e);
        std::process::exit(1);
    }
}
