//! Core of the lodging manager. The `Engine` owns the resident, room and
//! payment collections, keeps room occupancy consistent with resident
//! assignments, maintains the append-only payment ledger and answers
//! revenue/occupancy queries over the current snapshot.
//!
//! The resource model is single-writer: every mutation runs to completion on
//! `&mut self` before the next command, so no locking is needed inside the
//! engine. Snapshot writes to the [`StorageGateway`] are fire-and-forget per
//! affected collection; a failed write keeps the collection in a dirty set
//! and is retried on the next mutation.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use uuid::Uuid;

pub use commands::{NewResident, RecordPayment, UpdateRoom};
pub use error::EngineError;
pub use mess::MessFeeConfig;
pub use month::MonthKey;
pub use ops::{MonthlyRevenue, OccupancySummary, RevenueByKind, StatusCounts};
pub use payments::{Payment, PaymentKind, PaymentStatus};
pub use residents::{Resident, ResidentStatus};
pub use rooms::{Room, RoomStatus};
pub use storage::{Collection, JsonDirStore, MemoryStore, StorageError, StorageGateway};

mod commands;
mod error;
mod mess;
mod month;
mod occupancy;
mod ops;
mod payments;
mod residents;
mod rooms;
mod storage;

type ResultEngine<T> = Result<T, EngineError>;

/// Owns the in-memory snapshot and the handle to durable storage.
#[derive(Debug)]
pub struct Engine {
    residents: Vec<Resident>,
    rooms: Vec<Room>,
    payments: Vec<Payment>,
    mess_fee: MessFeeConfig,
    store: Box<dyn StorageGateway>,
    unsaved: BTreeSet<Collection>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn mess_fee(&self) -> MessFeeConfig {
        self.mess_fee
    }

    pub fn resident(&self, id: Uuid) -> ResultEngine<&Resident> {
        self.residents
            .iter()
            .find(|resident| resident.id == id)
            .ok_or_else(|| EngineError::ResidentNotFound(id.to_string()))
    }

    pub fn room(&self, number: &str) -> ResultEngine<&Room> {
        self.rooms
            .iter()
            .find(|room| room.number == number)
            .ok_or_else(|| EngineError::RoomNotFound(number.to_string()))
    }

    /// Collections whose latest state has not reached durable storage.
    pub fn unsaved(&self) -> Vec<Collection> {
        self.unsaved.iter().copied().collect()
    }

    /// Snapshot the touched collections, retrying anything that failed
    /// earlier. Write failures are non-fatal: the in-memory state stays
    /// authoritative and the collection remains marked dirty.
    fn persist(&mut self, touched: &[Collection]) {
        self.unsaved.extend(touched.iter().copied());

        let pending: Vec<Collection> = self.unsaved.iter().copied().collect();
        for collection in pending {
            let blob = match self.encode(collection) {
                Ok(blob) => blob,
                Err(err) => {
                    tracing::warn!(%collection, error = %err, "snapshot encode failed");
                    continue;
                }
            };
            match self.store.save(collection, &blob) {
                Ok(()) => {
                    self.unsaved.remove(&collection);
                }
                Err(err) => {
                    tracing::warn!(
                        %collection,
                        error = %err,
                        "snapshot write failed; keeping in-memory state, will retry"
                    );
                }
            }
        }
    }

    fn encode(&self, collection: Collection) -> Result<Vec<u8>, StorageError> {
        let blob = match collection {
            Collection::Residents => serde_json::to_vec(&self.residents)?,
            Collection::Payments => serde_json::to_vec(&self.payments)?,
            Collection::Rooms => serde_json::to_vec(&self.rooms)?,
            Collection::MessFee => serde_json::to_vec(&self.mess_fee)?,
        };
        Ok(blob)
    }
}

/// The builder for `Engine`.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    store: Option<Box<dyn StorageGateway>>,
}

impl EngineBuilder {
    /// Pass the durable store. Defaults to an in-memory store when omitted.
    #[must_use]
    pub fn store(mut self, store: impl StorageGateway + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Construct `Engine`, loading every collection from the store. Absent
    /// keys fall back to the built-in defaults: rooms 101 and 102 with two
    /// beds each, mess fee 2000 and active, empty residents and payments.
    pub fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryStore::default()));

        let residents = load_or(store.as_ref(), Collection::Residents, Vec::new)?;
        let payments = load_or(store.as_ref(), Collection::Payments, Vec::new)?;
        let rooms = load_or(store.as_ref(), Collection::Rooms, default_rooms)?;
        let mess_fee = load_or(store.as_ref(), Collection::MessFee, MessFeeConfig::default)?;

        Ok(Engine {
            residents,
            rooms,
            payments,
            mess_fee,
            store,
            unsaved: BTreeSet::new(),
        })
    }
}

fn load_or<T: DeserializeOwned>(
    store: &dyn StorageGateway,
    collection: Collection,
    fallback: impl FnOnce() -> T,
) -> ResultEngine<T> {
    match store.load(collection)? {
        Some(bytes) => {
            let value = serde_json::from_slice(&bytes).map_err(StorageError::from)?;
            Ok(value)
        }
        None => Ok(fallback()),
    }
}

fn default_rooms() -> Vec<Room> {
    vec![Room::new("101", 2), Room::new("102", 2)]
}
