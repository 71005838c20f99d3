use std::any::Any;

use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use investai_core::errors::{DatabaseError, Error, Result};

// A write job runs against the actor's connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyBox = Box<dyn Any + Send + 'static>;
type Envelope = (Job<AnyBox>, oneshot::Sender<Result<AnyBox>>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "database writer is not running".to_string(),
    ))
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone())?;

        let boxed = ret_rx.await.map_err(|_| writer_gone())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "writer returned an unexpected result type".to_string(),
            ))
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor owns one pooled connection and processes jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                let message = e.to_string();
                error!("Writer actor could not acquire a connection: {}", message);
                // Fail every queued job instead of leaving callers hanging
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(Error::Database(DatabaseError::ConnectionFailed(
                        message.clone(),
                    ))));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // Receiver may have been dropped (request cancelled)
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
