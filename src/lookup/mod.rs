// Profile lookup — fetching a ProfileRecord by username and platform.
//
// Only a mocked source ships: the engine never reaches out to a network,
// and the lookup is kept behind a trait so a real client can slot in.

pub mod links;
pub mod mock;
pub mod traits;

pub use mock::MockLookup;
pub use traits::ProfileLookup;
