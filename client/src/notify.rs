/// Blocking user-facing alerts.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}
