//! Worker pool that serves JSON requests the way the event bus delivers them:
//! each request carries its own reply channel.
use crate::Persistor;

use anyhow::{Context, Result, anyhow};
use crossbeam::channel::{self, Receiver, Sender};
use serde_json::Value;
use tracing::{debug, info};

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

struct Envelope {
    request: Value,
    reply_to: Sender<Value>,
}

pub struct Dispatcher {
    sender: Option<Sender<Envelope>>,
    workers: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    const QUEUE_LEN: usize = 1024;

    /// Spawns `workers` threads (at least one) sharing `persistor`.
    pub fn spawn(persistor: Arc<Persistor>, workers: usize) -> Result<Self> {
        let (sender, receiver) = channel::bounded::<Envelope>(Self::QUEUE_LEN);
        let workers = (0..workers.max(1))
            .map(|index| {
                let persistor = Arc::clone(&persistor);
                let receiver = receiver.clone();
                thread::Builder::new()
                    .name(format!("persistor-worker-{index}"))
                    .spawn(move || serve(&persistor, receiver))
                    .context("Failed to spawn persistor worker")
            })
            .collect::<Result<Vec<_>>>()?;
        info!(workers = workers.len(), "dispatcher started");
        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    /// Queues `request`; the reply arrives on the returned receiver.
    pub fn send(&self, request: Value) -> Result<Receiver<Value>> {
        let (reply_to, reply) = channel::bounded(1);
        self.sender
            .as_ref()
            .context("Dispatcher is shut down")?
            .send(Envelope { request, reply_to })
            .map_err(|_| anyhow!("All persistor workers exited"))?;
        Ok(reply)
    }

    /// Sends `request` and blocks until its reply arrives.
    pub fn request(&self, request: Value) -> Result<Value> {
        self.send(request)?
            .recv()
            .context("Worker dropped the reply channel")
    }

    /// Stops accepting requests, drains the queue and joins every worker.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            worker
                .join()
                .map_err(|_| anyhow!("Persistor worker panicked"))?;
        }
        Ok(())
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn serve(persistor: &Persistor, receiver: Receiver<Envelope>) {
    for Envelope { request, reply_to } in receiver {
        let reply = persistor.handle_json(&request);
        if reply_to.send(reply).is_err() {
            debug!("requester went away before the reply");
        }
    }
}
