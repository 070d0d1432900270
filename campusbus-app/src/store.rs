use campusbus_nav::{StudentEvent, StudentNavigator, StudentScreen, Transition};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Handle screens use to ask for navigation. Cheap to clone; sending never blocks.
#[derive(Debug)]
pub struct IntentSender<E> {
    tx: UnboundedSender<E>,
}

impl<E> Clone for IntentSender<E> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<E: std::fmt::Debug> IntentSender<E> {
    pub fn send(&self, event: E) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Intent dropped, store is gone: {:?}", e.0);
        }
    }
}

/// Receiving end, owned by whichever store applies the intents
pub struct IntentQueue<E> {
    rx: UnboundedReceiver<E>,
}

impl<E> IntentQueue<E> {
    /// Take every intent sent so far, in arrival order
    pub fn drain(&mut self) -> Vec<E> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn intent_channel<E>() -> (IntentSender<E>, IntentQueue<E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IntentSender { tx }, IntentQueue { rx })
}

/// Central state container for the student app: the navigator plus the
/// queue every screen posts its intents to.
pub struct Store {
    navigator: StudentNavigator,
    sender: IntentSender<StudentEvent>,
    queue: IntentQueue<StudentEvent>,
}

impl Store {
    pub fn new() -> Self {
        let (sender, queue) = intent_channel();
        Self {
            navigator: StudentNavigator::new(),
            sender,
            queue,
        }
    }

    pub fn intents(&self) -> IntentSender<StudentEvent> {
        self.sender.clone()
    }

    pub fn navigator(&self) -> &StudentNavigator {
        &self.navigator
    }

    pub fn screen(&self) -> StudentScreen {
        self.navigator.screen()
    }

    /// Apply everything screens have posted since the last call
    pub fn process_intents(&mut self) -> Vec<Transition<StudentScreen>> {
        self.queue
            .drain()
            .into_iter()
            .map(|event| self.navigator.apply(event))
            .collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
