/// User-facing message sink for successful upgrades.
///
/// Fire-and-forget: the orchestrator never reads anything back, and delivery
/// failures must not affect upgrade success.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Default sink that forwards messages to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        tracing::info!(target: "faction_uplift::notify", "{message}");
    }
}
