//! Dense property storage parallel to the vertex or edge index space.

use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::descriptor::Descriptor;
use crate::error::{GraphError, Result};

/// Fixed-size array of `T` addressed by descriptors of type `K`.
///
/// `PropertyMap<_, ()>` occupies no heap memory, which is how "no property"
/// is expressed.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyMap<K, T> {
    values: Vec<T>,
    _key: PhantomData<K>,
}

impl<K: Descriptor, T> PropertyMap<K, T> {
    pub fn from_vec(values: Vec<T>) -> Self { Self { values, _key: PhantomData } }

    /// Wraps `values`, checking it covers exactly `expected` keys.
    pub fn try_with_len(values: Vec<T>, expected: usize, what: &'static str) -> Result<Self> {
        if values.len() != expected {
            return Err(GraphError::PropertyLengthMismatch { what, expected, actual: values.len() });
        }
        Ok(Self::from_vec(values))
    }

    #[inline] pub fn len(&self) -> usize { self.values.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }

    #[inline]
    pub fn get(&self, key: K) -> Option<&T> { self.values.get(key.dense_index()) }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> { self.values.get_mut(key.dense_index()) }

    #[inline] pub fn as_slice(&self) -> &[T] { &self.values }
    #[inline] pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.values }
    pub fn into_vec(self) -> Vec<T> { self.values }

    pub fn iter(&self) -> core::slice::Iter<'_, T> { self.values.iter() }
}

impl<K: Descriptor, T: Clone> PropertyMap<K, T> {
    pub fn filled(len: usize, value: T) -> Self { Self::from_vec(vec![value; len]) }
}

impl<K: Descriptor, T: Default> PropertyMap<K, T> {
    pub fn with_default(len: usize) -> Self {
        let mut values = Vec::with_capacity(len);
        values.resize_with(len, T::default);
        Self::from_vec(values)
    }
}

impl<K: Descriptor, T> Index<K> for PropertyMap<K, T> {
    type Output = T;
    #[inline]
    fn index(&self, key: K) -> &T {
        let i = key.dense_index();
        assert!(i < self.values.len(), "property index {} out of range for {} entries", i, self.values.len());
        &self.values[i]
    }
}

impl<K: Descriptor, T> IndexMut<K> for PropertyMap<K, T> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut T {
        let i = key.dense_index();
        assert!(i < self.values.len(), "property index {} out of range for {} entries", i, self.values.len());
        &mut self.values[i]
    }
}
