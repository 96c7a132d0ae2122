//! Some utility functions

pub mod comparison;

use std::sync::{Mutex, MutexGuard};

use crate::activity::Activity;
use crate::render::{ActivityCard, ListView};


/// Lock a mutex, ignoring poisoning
///
/// The data behind our mutexes is always left consistent, even when a holder panics.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A debug utility that pretty-prints a query result
pub fn print_activity_list<'a, I>(entries: I)
where
    I: IntoIterator<Item = (&'a str, &'a Activity)>,
{
    for (name, activity) in entries {
        println!("ACT {} ({} spots left)", name, activity.spots_left());
        println!("    {}", activity.schedule());
        for email in activity.participants() {
            println!("    * {}", email);
        }
    }
}

/// A debug utility that pretty-prints what the list area currently displays
pub fn print_list_view(view: &ListView) {
    match view {
        ListView::Cards(cards) => {
            for card in cards {
                print_card(card);
            }
        },
        other => println!("{}", other.placeholder_text().unwrap_or_default()),
    }
}

pub fn print_card(card: &ActivityCard) {
    println!("{}", card.name);
    println!("    {}", card.description);
    println!("    Schedule: {}", card.schedule);
    println!("    Availability: {} spots left", card.spots_left);
    if card.participants.is_empty() {
        println!("    No participants yet");
    }
    for participant in &card.participants {
        println!("    * {}", participant.email);
    }
}
