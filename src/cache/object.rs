// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Identity-stable domain objects.
//!
//! An object is shared as `Arc<T>`; its identity is the allocation, not the
//! name. Fields are mutated in place through interior mutability so every
//! holder of the `Arc` observes updates.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::{RepoResult, StateError};

/// Name and deletion flag shared by every domain object.
#[derive(Debug)]
pub struct ObjectLifetime {
    name: RwLock<String>,
    deleted: AtomicBool,
}

impl ObjectLifetime {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: RwLock::new(name.into()),
            deleted: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_name(&self, name: impl Into<String>) {
        *self.name.write().unwrap_or_else(PoisonError::into_inner) = name.into();
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted.load(Ordering::Acquire)
    }

    /// One-way: a deleted object never comes back.
    pub(crate) fn mark_deleted(&self) {
        self.deleted.store(true, Ordering::Release);
    }
}

/// Entity stored in an [`ObjectCollection`](super::ObjectCollection).
pub trait DomainObject: Send + Sync + 'static {
    /// Raw fields as parsed from git output.
    type Data: Clone + PartialEq + Debug + Send + Sync;

    /// Human-readable kind, used in errors.
    const KIND: &'static str;

    /// Factory used when a key first appears.
    fn create(name: String, data: Self::Data) -> Self
    where
        Self: Sized;

    /// Storage of the name, deletion flag and fields.
    fn cell(&self) -> &ObjectCell<Self::Data>;

    fn lifetime(&self) -> &ObjectLifetime {
        self.cell().lifetime()
    }

    /// Current fields.
    fn data(&self) -> Self::Data {
        self.cell().get()
    }

    fn name(&self) -> String {
        self.lifetime().name()
    }

    fn is_deleted(&self) -> bool {
        self.lifetime().is_deleted()
    }

    /// Fails with `StateError::Deleted` once the object left its collection.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted object.
    fn ensure_alive(&self) -> RepoResult<()> {
        if self.is_deleted() {
            return Err(StateError::Deleted {
                kind: Self::KIND,
                name: self.name(),
            }
            .into());
        }
        Ok(())
    }

    /// Replaces the fields in place. Returns true if anything differed.
    ///
    /// Reconciliation writes through the cell directly; every other
    /// mutation goes through here.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted object.
    fn update(&self, data: Self::Data) -> RepoResult<bool> {
        self.ensure_alive()?;
        Ok(self.cell().replace(data))
    }
}

/// Storage helper implementing the field half of [`DomainObject`].
#[derive(Debug)]
pub struct ObjectCell<D> {
    lifetime: ObjectLifetime,
    data: RwLock<D>,
}

impl<D: Clone + PartialEq> ObjectCell<D> {
    pub fn new(name: impl Into<String>, data: D) -> Self {
        Self {
            lifetime: ObjectLifetime::new(name),
            data: RwLock::new(data),
        }
    }

    pub const fn lifetime(&self) -> &ObjectLifetime {
        &self.lifetime
    }

    pub fn get(&self) -> D {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reads one field without cloning the rest.
    pub fn with<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.data.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub(crate) fn replace(&self, data: D) -> bool {
        let mut current = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if *current == data {
            return false;
        }
        *current = data;
        true
    }
}

/// Implements [`DomainObject`] for a newtype around [`ObjectCell`].
macro_rules! domain_object {
    ($object:ty, $data:ty, $kind:literal) => {
        impl $crate::cache::DomainObject for $object {
            type Data = $data;
            const KIND: &'static str = $kind;

            fn create(name: String, data: Self::Data) -> Self {
                Self($crate::cache::ObjectCell::new(name, data))
            }

            fn cell(&self) -> &$crate::cache::ObjectCell<Self::Data> {
                &self.0
            }
        }

        impl ::std::fmt::Debug for $object {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($object))
                    .field("name", &self.0.lifetime().name())
                    .field("deleted", &self.0.lifetime().is_deleted())
                    .field("data", &self.0.get())
                    .finish()
            }
        }
    };
}

pub(crate) use domain_object;
