use std::cell::RefCell;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::rc::Rc;
use std::str::FromStr;

use crate::api::capture::*;
use crate::prelude::Collectable;

type Transform<'a, T> = Box<dyn Fn(&str) -> Option<T> + 'a>;

struct SingleState<'a, T> {
    value: Option<T>,
    default: T,
    transform: Transform<'a, T>,
}

/// An accumulator that holds at most one value; the last write wins.
///
/// Cloning produces another handle onto the same accumulated state.
pub struct Single<'a, T> {
    state: Rc<RefCell<SingleState<'a, T>>>,
}

impl<'a, T> Clone for Single<'a, T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<'a, T> Single<'a, T>
where
    T: FromStr + Default + 'a,
{
    /// Create a single value accumulator, transforming via [`std::str::FromStr`] and defaulting to `T::default()`.
    pub fn new() -> Self {
        Self::with_transform(parse::<T>)
    }
}

impl<'a, T> Default for Single<'a, T>
where
    T: FromStr + Default + 'a,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> Single<'a, T>
where
    T: Default,
{
    /// Create a single value accumulator with a custom transform.
    pub fn with_transform(transform: impl Fn(&str) -> Option<T> + 'a) -> Self {
        Self {
            state: Rc::new(RefCell::new(SingleState {
                value: None,
                default: T::default(),
                transform: Box::new(transform),
            })),
        }
    }
}

impl<'a, T> Single<'a, T> {
    /// Replace the default value.
    pub fn with_default(self, default: T) -> Self {
        self.state.borrow_mut().default = default;
        self
    }

    /// Whether a value has been accumulated (as opposed to presenting the default).
    pub fn is_set(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl<'a, T: Clone> Single<'a, T> {
    /// The last accumulated value, or the default.
    pub fn current_value(&self) -> T {
        let state = self.state.borrow();
        state.value.as_ref().unwrap_or(&state.default).clone()
    }
}

impl<'a, T: Clone> Accumulate<T> for Single<'a, T> {
    fn apply(&mut self, raw: &str) -> Result<T, TransformError> {
        let mut state = self.state.borrow_mut();
        let value = (state.transform)(raw).ok_or_else(|| TransformError::new::<T>(raw))?;
        state.value.replace(value.clone());
        Ok(value)
    }

    fn reset(&mut self) {
        self.state.borrow_mut().value = None;
    }
}

struct ListState<'a, C, T> {
    values: C,
    initial: C,
    transform: Transform<'a, T>,
}

/// An accumulator that appends every value, in encounter order, onto its initial collection.
///
/// The collection may be anything [`Collectable`]; `Vec<T>` by default.
/// Cloning produces another handle onto the same accumulated state.
pub struct List<'a, T, C = Vec<T>> {
    state: Rc<RefCell<ListState<'a, C, T>>>,
    _phantom: PhantomData<T>,
}

impl<'a, T, C> Clone for List<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, C> List<'a, T, C>
where
    T: FromStr + 'a,
    C: Collectable<T> + Clone + Default,
{
    /// Create a list accumulator, transforming via [`std::str::FromStr`] and starting from an empty collection.
    pub fn new() -> Self {
        Self::with_transform(parse::<T>)
    }
}

impl<'a, T, C> Default for List<'a, T, C>
where
    T: FromStr + 'a,
    C: Collectable<T> + Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, C> List<'a, T, C>
where
    C: Collectable<T> + Clone + Default,
{
    /// Create a list accumulator with a custom transform.
    pub fn with_transform(transform: impl Fn(&str) -> Option<T> + 'a) -> Self {
        Self {
            state: Rc::new(RefCell::new(ListState {
                values: C::default(),
                initial: C::default(),
                transform: Box::new(transform),
            })),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, C> List<'a, T, C>
where
    C: Collectable<T> + Clone,
{
    /// Replace the initial collection; accumulated values extend it.
    pub fn with_default(self, initial: C) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.values = initial.clone();
            state.initial = initial;
        }
        self
    }

    /// The accumulated collection (including the initial values).
    pub fn current_values(&self) -> C {
        self.state.borrow().values.clone()
    }
}

impl<'a, T, C> Accumulate<T> for List<'a, T, C>
where
    T: Clone,
    C: Collectable<T> + Clone,
{
    fn apply(&mut self, raw: &str) -> Result<T, TransformError> {
        let mut state = self.state.borrow_mut();
        let value = (state.transform)(raw).ok_or_else(|| TransformError::new::<T>(raw))?;
        state.values.add(value.clone());
        Ok(value)
    }

    fn reset(&mut self) {
        let mut state = self.state.borrow_mut();
        state.values = state.initial.clone();
    }
}

struct Callbacks<'a, T> {
    on_value: Box<dyn FnMut(&T) + 'a>,
    on_complete: Option<Box<dyn FnMut() + 'a>>,
}

/// A list accumulator that also delivers each value to a callback, at the moment it is accumulated.
///
/// The optional completion callback fires once per parse pass, after the option's last value in that pass.
/// Both callbacks run synchronously on the parsing thread.
/// They may read this accumulator, but must not apply values to it.
pub struct Async<'a, T> {
    values: List<'a, T>,
    callbacks: Rc<RefCell<Callbacks<'a, T>>>,
}

impl<'a, T> Clone for Async<'a, T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<'a, T: FromStr + Clone + 'a> Async<'a, T> {
    /// Create an async accumulator, transforming via [`std::str::FromStr`].
    pub fn new(on_value: impl FnMut(&T) + 'a) -> Self {
        Self::with_transform(parse::<T>, on_value)
    }
}

impl<'a, T: Clone> Async<'a, T> {
    /// Create an async accumulator with a custom transform.
    pub fn with_transform(
        transform: impl Fn(&str) -> Option<T> + 'a,
        on_value: impl FnMut(&T) + 'a,
    ) -> Self {
        Self {
            values: List::with_transform(transform),
            callbacks: Rc::new(RefCell::new(Callbacks {
                on_value: Box::new(on_value),
                on_complete: None,
            })),
        }
    }

    /// Register the completion callback.
    pub fn on_complete(self, on_complete: impl FnMut() + 'a) -> Self {
        self.callbacks
            .borrow_mut()
            .on_complete
            .replace(Box::new(on_complete));
        self
    }
}

impl<'a, T: Clone> Async<'a, T> {
    /// Replace the initial values; accumulated values extend them.
    pub fn with_default(self, initial: Vec<T>) -> Self {
        Self {
            values: self.values.with_default(initial),
            callbacks: self.callbacks,
        }
    }

    /// The accumulated values (including the initial values).
    pub fn current_values(&self) -> Vec<T> {
        self.values.current_values()
    }
}

impl<'a, T: Clone> Accumulate<T> for Async<'a, T> {
    fn apply(&mut self, raw: &str) -> Result<T, TransformError> {
        // The values borrow is released before the callback runs.
        let value = self.values.apply(raw)?;
        (self.callbacks.borrow_mut().on_value)(&value);
        Ok(value)
    }

    fn complete(&mut self) {
        if let Some(on_complete) = self.callbacks.borrow_mut().on_complete.as_mut() {
            on_complete();
        }
    }

    fn reset(&mut self) {
        self.values.reset();
    }
}

struct SwitchState<T> {
    value: Option<T>,
    default: T,
    target: T,
}

/// A flag accumulator: takes no input, and presents `target` once matched.
///
/// Cloning produces another handle onto the same accumulated state.
pub struct Switch<T> {
    state: Rc<RefCell<SwitchState<T>>>,
}

impl<T> Clone for Switch<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> Switch<T> {
    /// Create a switch which presents `default` until matched, and `target` after.
    pub fn new(default: T, target: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(SwitchState {
                value: None,
                default,
                target,
            })),
        }
    }

    /// Whether the switch has been matched.
    pub fn is_set(&self) -> bool {
        self.state.borrow().value.is_some()
    }
}

impl Switch<bool> {
    /// The typical boolean flag: `false` until matched.
    pub fn flag() -> Self {
        Self::new(false, true)
    }
}

impl<T: Clone> Switch<T> {
    /// The target if matched, otherwise the default.
    pub fn current_value(&self) -> T {
        let state = self.state.borrow();
        state.value.as_ref().unwrap_or(&state.default).clone()
    }
}

impl<T: Clone> Accumulate<T> for Switch<T> {
    fn apply(&mut self, _raw: &str) -> Result<T, TransformError> {
        let mut state = self.state.borrow_mut();
        let value = state.target.clone();
        state.value.replace(value.clone());
        Ok(value)
    }

    fn reset(&mut self) {
        self.state.borrow_mut().value = None;
    }
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Eq + std::hash::Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}
