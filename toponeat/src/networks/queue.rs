use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

/// A first-in-first-out queue.
///
/// # Examples
/// ```
/// use toponeat::networks::Fifo;
///
/// let mut queue: Fifo<_> = (1..=3).collect();
/// queue.push(4);
///
/// assert_eq!(queue.to_string(), "1 <- 2 <- 3 <- 4");
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fifo<T> {
    items: VecDeque<T>,
}

impl<T> Fifo<T> {
    pub fn new() -> Fifo<T> {
        Fifo {
            items: VecDeque::new(),
        }
    }

    /// Creates an empty queue with space for
    /// at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Fifo<T> {
        Fifo {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an element to the back of the queue.
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes the element at the front of the queue.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Returns the element at the front of
    /// the queue without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Fifo<T> {
    fn default() -> Fifo<T> {
        Fifo::new()
    }
}

impl<T> FromIterator<T> for Fifo<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Fifo<T> {
        Fifo {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Fifo<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// Renders the queue front to back.
impl<T: fmt::Display> fmt::Display for Fifo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.items.iter();
        if let Some(first) = items.next() {
            write!(f, "{}", first)?;
            for item in items {
                write!(f, " <- {}", item)?;
            }
        }
        Ok(())
    }
}
