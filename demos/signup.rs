//! Signs a student up for an activity (or unregisters them), then prints the updated activity.
//!
//! Usage: `cargo run --example signup -- <activity> <email> [--unregister]`
//! The server URL is read from `ACTIVITY_SIGNUP_URL`.

use activity_signup::category::CategoryIndex;
use activity_signup::client::Client;
use activity_signup::controller::{Command, Controller};
use activity_signup::render::RemovalAction;


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("Usage: signup <activity> <email> [--unregister]");
        return;
    }
    let activity = args[0].clone();
    let email = args[1].clone();
    let unregister = args.iter().any(|a| a == "--unregister");

    let client = match Client::from_config() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Unable to create a client: {}", err);
            return;
        },
    };
    let controller = Controller::new(client, CategoryIndex::school_defaults());
    controller.dispatch(Command::Refresh).await;

    if unregister {
        controller.dispatch(Command::Unregister(RemovalAction::new(&activity, &email))).await;
    } else {
        controller.dispatch(Command::SetEmail(email)).await;
        controller.dispatch(Command::SelectActivity(activity.clone())).await;
        controller.dispatch(Command::SubmitSignup).await;
    }

    match controller.feedback().message {
        Some(message) => println!("{}", message),
        None => println!("Nothing was submitted"),
    }

    controller.dispatch(Command::SetSearch(activity)).await;
    activity_signup::utils::print_list_view(&controller.list());
}
