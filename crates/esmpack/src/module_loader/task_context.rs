use esmpack_common::ModuleLoaderMsg;
use esmpack_fs::OsFileSystem;
use tokio::sync::mpsc::Sender;

use crate::types::{SharedOptions, SharedResolver};

/// Used to store common data shared between all module tasks.
pub struct TaskContext {
  pub fs: OsFileSystem,
  pub resolver: SharedResolver,
  pub options: SharedOptions,
  pub tx: Sender<ModuleLoaderMsg>,
}
