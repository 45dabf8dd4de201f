//! Software interrupt controller

use tctl_core::{InterruptHandler, InterruptLine, TcError, TcResult, TriggerMode};

#[derive(Debug, Clone, Copy)]
struct Attachment {
    pin: u8,
    mode: TriggerMode,
    handler: InterruptHandler,
}

/// Interrupt controller with `pins` interrupt-capable pins whose edges are
/// raised by calling [`fire`](Self::fire).
#[derive(Debug, Default)]
pub struct SimInterruptLine {
    pins: u8,
    attached: Vec<Attachment>,
}

impl SimInterruptLine {
    pub fn new(pins: u8) -> Self {
        Self {
            pins,
            attached: Vec::new(),
        }
    }

    /// Raise one qualifying edge on `pin`.
    ///
    /// Runs the attached handler once and returns `true`, or returns `false`
    /// when nothing is attached.
    pub fn fire(&self, pin: u8) -> bool {
        match self.find(pin) {
            Some(attachment) => {
                (attachment.handler)();
                true
            }
            None => false,
        }
    }

    /// Mode the pin is attached with
    pub fn mode(&self, pin: u8) -> Option<TriggerMode> {
        self.find(pin).map(|attachment| attachment.mode)
    }

    pub fn is_attached(&self, pin: u8) -> bool {
        self.find(pin).is_some()
    }

    fn find(&self, pin: u8) -> Option<&Attachment> {
        self.attached.iter().find(|attachment| attachment.pin == pin)
    }
}

impl InterruptLine for SimInterruptLine {
    fn attach(&mut self, pin: u8, mode: TriggerMode, handler: InterruptHandler) -> TcResult<()> {
        if pin >= self.pins {
            return Err(TcError::InvalidPin(pin));
        }
        self.attached.retain(|attachment| attachment.pin != pin);
        self.attached.push(Attachment { pin, mode, handler });
        log::debug!("pin {} attached ({:?})", pin, mode);
        Ok(())
    }

    fn detach(&mut self, pin: u8) -> TcResult<()> {
        let before = self.attached.len();
        self.attached.retain(|attachment| attachment.pin != pin);
        if self.attached.len() == before {
            return Err(TcError::NotAttached(pin));
        }
        Ok(())
    }
}
