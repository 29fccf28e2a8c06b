//! Generation tickets for discarding superseded async results.

/// Identifies one started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Monotonic counter for one kind of load.
///
/// Starting a load takes a ticket; changing the load's inputs invalidates
/// all outstanding tickets. A result may only be applied while its ticket is
/// still current.
///
/// # Examples
///
/// ```
/// use playground_browser::Generation;
///
/// let mut records = Generation::default();
/// let first = records.begin();
/// let second = records.begin();
/// assert!(!records.is_current(first));
/// assert!(records.is_current(second));
///
/// records.invalidate();
/// assert!(!records.is_current(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Starts a new load, superseding every earlier ticket.
    pub fn begin(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    /// Supersedes every outstanding ticket without starting a load.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    /// Whether results for `ticket` may still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}
