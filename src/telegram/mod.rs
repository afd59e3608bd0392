pub mod notifications;

pub use notifications::{Notifier, TelegramNotifier};

#[cfg(test)]
pub use notifications::MockNotifier;
