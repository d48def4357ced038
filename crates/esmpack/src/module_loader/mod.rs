pub mod task_context;

mod module_task;

use std::sync::Arc;

use arcstr::ArcStr;
use esmpack_common::{
  EntryPoint, ExternalModule, ImportRecordIdx, Module, ModuleId, ModuleIdx, ModuleLoaderMsg,
  NormalModuleTaskResult, ResolvedId,
};
use esmpack_error::BuildResult;
use esmpack_fs::OsFileSystem;
use module_task::{ModuleTask, ModuleTaskOwner};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;
use task_context::TaskContext;
use tokio::sync::mpsc::Receiver;
use tracing::debug;

use crate::types::{IndexModules, SharedOptions, SharedResolver};

pub struct IntermediateNormalModules {
  pub modules: IndexVec<ModuleIdx, Option<Module>>,
  pub importers: IndexVec<ModuleIdx, Vec<ModuleId>>,
}

impl IntermediateNormalModules {
  pub fn new() -> Self {
    Self { modules: IndexVec::new(), importers: IndexVec::new() }
  }

  pub fn alloc_module_idx(&mut self) -> ModuleIdx {
    self.modules.push(None);
    self.importers.push(Vec::new())
  }
}

/// Drives one [`ModuleTask`] per reachable module and assembles their results into the graph.
pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  inm: IntermediateNormalModules,
  /// Keyed by module id, so a module reached twice is loaded once.
  visited: FxHashMap<ArcStr, ModuleIdx>,
}

#[derive(Debug)]
pub struct ModuleLoaderOutput {
  pub modules: IndexModules,
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleLoader {
  pub fn new(fs: OsFileSystem, options: SharedOptions, resolver: SharedResolver) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);

    let shared_context = Arc::new(TaskContext { fs, resolver, options, tx });

    Self {
      rx,
      remaining: 0,
      shared_context,
      inm: IntermediateNormalModules::new(),
      visited: FxHashMap::default(),
    }
  }

  pub async fn fetch_all_modules(
    mut self,
    user_defined_entries: Vec<(Option<ArcStr>, ResolvedId)>,
  ) -> BuildResult<ModuleLoaderOutput> {
    self.inm.modules.reserve(user_defined_entries.len());

    let entry_points = user_defined_entries
      .into_iter()
      .map(|(name, info)| EntryPoint { idx: self.try_spawn_new_task(info, None, true), name })
      .collect::<Vec<_>>();

    let mut errors: Vec<anyhow::Error> = vec![];
    let mut warnings: Vec<anyhow::Error> = vec![];

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };

      match msg {
        ModuleLoaderMsg::NormalModuleDone(task_result) => {
          let NormalModuleTaskResult {
            mut module,
            resolved_deps,
            raw_import_records,
            warnings: task_result_warnings,
          } = task_result;

          warnings.extend(task_result_warnings);

          let importer_id = ModuleId::new(module.id());
          let owner_id = ArcStr::from(module.stable_id());
          let import_records = raw_import_records
            .into_iter()
            .zip(resolved_deps)
            .map(|(raw_rec, info)| {
              let owner = ModuleTaskOwner::new(ArcStr::clone(&owner_id));
              let idx = self.try_spawn_new_task(info, Some(owner), false);
              self.inm.importers[idx].push(importer_id.clone());
              raw_rec.into_resolved(idx)
            })
            .collect::<IndexVec<ImportRecordIdx, _>>();

          module.set_import_records(import_records);

          let module_idx = module.idx();
          self.inm.modules[module_idx] = Some(module);
          self.remaining -= 1;
        }
        ModuleLoaderMsg::BuildErrors(e) => {
          errors.extend(e);
          self.remaining -= 1;
        }
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    let modules: IndexModules = self
      .inm
      .modules
      .into_iter()
      .enumerate()
      .map(|(id, module)| {
        let mut module = module.expect("Module tasks did't complete as expected");

        if let Some(module) = module.as_normal_mut() {
          let id = ModuleIdx::from(id);
          for importer in std::mem::take(&mut self.inm.importers[id]) {
            module.importers.insert(importer);
          }
        }
        module
      })
      .collect();

    debug!(modules = modules.len(), entries = entry_points.len(), "module graph complete");

    Ok(ModuleLoaderOutput { modules, entry_points, warnings })
  }

  fn try_spawn_new_task(
    &mut self,
    resolved_id: ResolvedId,
    owner: Option<ModuleTaskOwner>,
    is_user_defined_entry: bool,
  ) -> ModuleIdx {
    match self.visited.entry(ArcStr::clone(&resolved_id.id)) {
      std::collections::hash_map::Entry::Occupied(visited) => *visited.get(),
      std::collections::hash_map::Entry::Vacant(not_visited) => {
        let idx = self.inm.alloc_module_idx();

        if resolved_id.is_external {
          self.inm.modules[idx] =
            Some(ExternalModule::new(idx, resolved_id.id, resolved_id.format).into());
        } else {
          self.remaining += 1;

          let task = ModuleTask::new(
            Arc::clone(&self.shared_context),
            idx,
            owner,
            resolved_id,
            is_user_defined_entry,
          );

          tokio::spawn(task.run());
        }

        *not_visited.insert(idx)
      }
    }
  }
}
