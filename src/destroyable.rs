// implemented by components holding subscriptions or timers that must be released explicitly
pub trait Destroyable {
    fn destroy(&mut self);
}
