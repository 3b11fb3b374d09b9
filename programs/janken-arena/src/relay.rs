//! Buffered notification relay for callback-driven hosts
//!
//! Listeners in a browser may call straight back into the game, so they must
//! never run while the controller is borrowed. The relay collects every
//! notice in an outbox and hands them out only after the controller call has
//! returned.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use round_logic::{MoveChooser, RandomChooser};

use crate::controller::{Intent, MatchController, PendingReveal};
use crate::observer::{Cue, MatchObserver};
use crate::state::Match;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Change(Match),
    Cue(Cue),
}

type Outbox = Rc<RefCell<Vec<Notice>>>;

struct Mailbox(Outbox);

impl MatchObserver for Mailbox {
    fn on_change(&mut self, snapshot: &Match) {
        self.0.borrow_mut().push(Notice::Change(snapshot.clone()));
    }

    fn on_cue(&mut self, cue: Cue) {
        self.0.borrow_mut().push(Notice::Cue(cue));
    }
}

pub(crate) struct Relay<C = RandomChooser> {
    controller: RefCell<MatchController<C>>,
    outbox: Outbox,
}

impl<C: MoveChooser> Relay<C> {
    pub(crate) fn new(mut controller: MatchController<C>) -> Self {
        let outbox: Outbox = Rc::new(RefCell::new(Vec::new()));
        controller.subscribe(Box::new(Mailbox(Rc::clone(&outbox))));
        Self {
            controller: RefCell::new(controller),
            outbox,
        }
    }

    pub(crate) fn controller(&self) -> Ref<'_, MatchController<C>> {
        self.controller.borrow()
    }

    /// Apply an intent and hand any reveal it starts to `arm`
    ///
    /// Notices are always delivered, even when arming fails. A reveal that
    /// could not be armed is completed on the spot so the match never waits
    /// on a timer that does not exist. Returns whether the intent was
    /// accepted, or the arming error.
    pub(crate) fn dispatch<E>(
        &self,
        intent: Intent,
        arm: impl FnOnce(PendingReveal) -> Result<(), E>,
        deliver: impl FnMut(Notice),
    ) -> Result<bool, E> {
        let result = self.controller.borrow_mut().dispatch(intent);
        let armed = match result {
            Ok(Some(pending)) => arm(pending).inspect_err(|_| {
                log::warn!("reveal {} could not be armed, resolving now", pending.token);
                if let Err(rejection) = self.controller.borrow_mut().complete_reveal(pending.token) {
                    log::warn!("immediate reveal rejected: {}", rejection);
                }
            }),
            Ok(None) => Ok(()),
            Err(_) => return Ok(false),
        };

        self.flush(deliver);
        armed.map(|()| true)
    }

    /// Timer callback for an armed reveal; stale tokens deliver nothing
    pub(crate) fn fire(&self, token: u64, deliver: impl FnMut(Notice)) -> bool {
        let result = self.controller.borrow_mut().complete_reveal(token);
        self.flush(deliver);
        result.is_ok()
    }

    fn flush(&self, deliver: impl FnMut(Notice)) {
        let notices: Vec<Notice> = self.outbox.borrow_mut().drain(..).collect();
        notices.into_iter().for_each(deliver);
    }
}
