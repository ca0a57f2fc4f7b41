//! Opaque items and the sources that supply them.

/// Stable identifier of an item, owned by whoever supplies the feed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An opaque payload plus its stable id. The engine never mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<T> {
    pub id: ItemId,
    pub payload: T,
}

impl<T> Item<T> {
    pub fn new(id: impl Into<ItemId>, payload: T) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// An item together with its position in the logical source sequence.
///
/// `sequence_index` counts every item pulled from the source since the last
/// `initialize`, so it keeps increasing across wraparound laps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueEntry<T> {
    pub item: Item<T>,
    pub sequence_index: u64,
}

/// Supplies items to the visible window one at a time.
///
/// Returning `None` signals exhaustion; the stack never polls the source
/// again after that.
pub trait ItemSource<T> {
    fn next_item(&mut self) -> Option<Item<T>>;
}

impl<T, I> ItemSource<T> for I
where
    I: Iterator<Item = Item<T>>,
{
    fn next_item(&mut self) -> Option<Item<T>> {
        self.next()
    }
}

/// A wraparound source that replays `items` in order forever.
///
/// An empty list yields an immediately exhausted source.
pub fn cycling<T: Clone>(items: Vec<Item<T>>) -> impl ItemSource<T> {
    items.into_iter().cycle()
}
