//! Lists the activities of a signup server, the way the signup page displays them.
//!
//! Usage: `cargo run --example basic -- [search] [category] [name|schedule|availability]`
//! The server URL is read from `ACTIVITY_SIGNUP_URL`.

use activity_signup::category::CategoryIndex;
use activity_signup::client::Client;
use activity_signup::controller::{Command, Controller};
use activity_signup::render::HtmlRenderer;
use activity_signup::view::SortKey;


#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let search = args.next().unwrap_or_default();
    let category = args.next().unwrap_or_default();
    let sort = SortKey::from_control_value(&args.next().unwrap_or_else(|| "name".to_string()));

    let client = match Client::from_config() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Unable to create a client: {}", err);
            return;
        },
    };
    println!("Fetching activities from {}", client.base_url());

    let controller = Controller::new(client, CategoryIndex::school_defaults());
    controller.dispatch(Command::Refresh).await;
    controller.dispatch(Command::SetSearch(search)).await;
    controller.dispatch(Command::SetCategory(category)).await;
    controller.dispatch(Command::SetSort(sort)).await;

    println!("---- Activities -----");
    activity_signup::utils::print_list_view(&controller.list());

    if std::env::var("PRINT_HTML").is_ok() {
        match HtmlRenderer::new().and_then(|renderer| renderer.render_list(&controller.list())) {
            Ok(html) => println!("{}", html),
            Err(err) => log::error!("Unable to render HTML: {}", err),
        }
    }
}
