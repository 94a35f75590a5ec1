pub mod alert;
pub mod driver;
pub mod offline;
pub mod shipper;
pub mod tire;
pub mod trailer;
pub mod trip;
pub mod vehicle;

pub use alert::{Alert, AlertKind};
pub use driver::Driver;
pub use offline::{DrainReport, OfflineEvent};
pub use shipper::Shipper;
pub use tire::Tire;
pub use trailer::Trailer;
pub use trip::{PaymentStatus, Trip};
pub use vehicle::Vehicle;

use crate::domain::value_objects::{Identity, RemoteId};

/// Implemented by every record the reconciler can push to the remote store.
///
/// The identity tag is the only sync state a record carries; there is no
/// separate dirty flag. Assigning a remote identity is what flips a record
/// from pending-creation to persisted.
pub trait SyncRecord: Clone + Send + Sync {
    fn identity(&self) -> &Identity;
    fn assign_identity(&mut self, id: RemoteId);
}
