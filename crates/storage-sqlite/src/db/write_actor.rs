use std::any::Any;

use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use super::{get_connection, DbPool};
use crate::errors::StorageError;
use tirta_core::errors::{DatabaseError, Error, Result};

// Jobs return core results; the actor erases the value type so one channel
// serves every caller.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection inside an immediate transaction.
    /// An `Err` from the job rolls the transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("the job channel is closed"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("the reply was dropped"))??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Database(DatabaseError::Internal(
                "Writer returned an unexpected result type".to_string(),
            )))
    }
}

fn writer_gone(reason: &str) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "Database writer stopped: {}",
        reason
    )))
}

/// Spawns the single database writer.
///
/// The actor holds one pooled connection for its whole life and runs jobs
/// one at a time, so SQLite never sees two concurrent writers.
pub fn spawn_writer(pool: &DbPool) -> Result<WriteHandle> {
    let mut conn = get_connection(pool)?;
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| {
                    let err: Error = e.into();
                    if !matches!(err, Error::Database(DatabaseError::UniqueViolation(_))) {
                        error!("Write transaction rolled back: {}", err);
                    }
                    err
                });

            // The caller may have gone away (request timeout); nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    Ok(WriteHandle { tx })
}
