//! System orchestrator.

use crate::clients::{ParcelClient, UserClient};
use crate::{parcel_actor, user_actor};
use tracing::{error, info};

/// Owns the running store actors and the clients that talk to them.
///
/// Construction spawns both actors and wires the parcel store's context:
/// the parcel actor validates agent assignments against the user store, so
/// it runs with a clone of the user store client.
///
/// Shutdown is by channel closure. Dropping the clients drops the senders,
/// each actor drains its queue and exits, and `shutdown` awaits the tasks.
pub struct ParcelSystem {
    pub parcel_client: ParcelClient,
    pub user_client: UserClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ParcelSystem {
    /// Spawns the user and parcel actors and returns their clients.
    pub fn new() -> Self {
        let (user_actor, user_client) = user_actor::new();
        let user_handle = tokio::spawn(user_actor.run(()));

        let (parcel_actor, parcel_client) = parcel_actor::new();
        // The parcel actor checks assignees against the user directory.
        let directory = user_client.store().clone();
        let parcel_handle = tokio::spawn(parcel_actor.run(directory));

        info!("Store actors started");
        Self {
            parcel_client,
            user_client,
            handles: vec![user_handle, parcel_handle],
        }
    }

    /// Drops the clients to close the request channels, then waits for
    /// both actor tasks to drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store actors");
        drop(self.parcel_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e:?}");
                return Err(format!("actor task failed: {e:?}"));
            }
        }
        info!("Shutdown complete");
        Ok(())
    }
}

impl Default for ParcelSystem {
    fn default() -> Self {
        Self::new()
    }
}
