use std::time::Duration;

/// Blocking delay used for settle times and the poll interval.
///
/// Swapped out in tests so loop iterations run without real time passing.
pub trait Sleep {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleep + ?Sized> Sleep for &mut S {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}
