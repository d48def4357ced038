use std::sync::Arc;

use arcstr::ArcStr;
use esmpack_common::{
  ImportKind, ImportRecordIdx, Module, ModuleFormat, ModuleId, ModuleIdx, ModuleLoaderMsg,
  NormalModule, NormalModuleTaskResult, RawImportRecord, ResolvedId,
};
use esmpack_ecmascript::EcmaCompiler;
use esmpack_error::BuildResult;
use esmpack_fs::FileSystem;
use esmpack_utils::indexmap::FxIndexSet;
use oxc_index::IndexVec;
use tracing::debug;

use super::task_context::TaskContext;
use crate::utils::{
  load_source::{load_source, source_type_of},
  resolve_id::resolve_id,
};

pub struct ModuleTaskOwner {
  importer_id: ArcStr,
}

impl ModuleTaskOwner {
  pub fn new(importer_id: ArcStr) -> Self {
    ModuleTaskOwner { importer_id }
  }
}

pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  owner: Option<ModuleTaskOwner>,
  resolved_id: ResolvedId,
  is_user_defined_entry: bool,
}

impl ModuleTask {
  pub fn new(
    ctx: Arc<TaskContext>,
    idx: ModuleIdx,
    owner: Option<ModuleTaskOwner>,
    resolved_id: ResolvedId,
    is_user_defined_entry: bool,
  ) -> Self {
    Self { ctx, idx, owner, resolved_id, is_user_defined_entry }
  }

  pub async fn run(mut self) {
    if let Err(errs) = self.run_inner().await {
      self.ctx.tx.send(ModuleLoaderMsg::BuildErrors(errs.0)).await.expect("Send should not fail");
    }
  }

  async fn run_inner(&mut self) -> BuildResult<()> {
    let fs: &dyn FileSystem = &self.ctx.fs;
    let source = load_source(fs, &self.resolved_id).map_err(|err| {
      anyhow::anyhow!(
        "Could not load {}{} - {}.",
        self.resolved_id.debug_id(self.ctx.options.cwd.as_path()),
        self
          .owner
          .as_ref()
          .map(|owner| format!(" (imported by {})", owner.importer_id))
          .unwrap_or_default(),
        err,
      )
    })?;

    let id = ModuleId::new(ArcStr::clone(&self.resolved_id.id));
    let stable_id = id.stabilize(&self.ctx.options.cwd);

    let mut warnings = vec![];
    let mut raw_import_records = IndexVec::<ImportRecordIdx, RawImportRecord>::default();
    let mut has_export_declarations = false;

    match source_type_of(self.resolved_id.format) {
      Some(source_type) => {
        let scan = EcmaCompiler::scan(&source, source_type).map_err(|errs| {
          errs.0
            .into_iter()
            .map(|err| err.context(format!("Failed to parse {stable_id}")))
            .collect::<Vec<_>>()
        })?;
        has_export_declarations = scan.has_export_declarations;
        raw_import_records = scan
          .imports
          .into_iter()
          .map(|import| {
            let kind = if import.is_reexport { ImportKind::ExportFrom } else { ImportKind::Import };
            RawImportRecord::new(import.specifier, kind, import.span)
          })
          .collect();
      }
      None if self.resolved_id.format == ModuleFormat::Undefined => {
        warnings.push(anyhow::anyhow!(
          "Unknown format of {stable_id}, its dependencies are not scanned."
        ));
      }
      None => {}
    }

    let mut errors = vec![];
    let mut resolved_deps =
      IndexVec::<ImportRecordIdx, ResolvedId>::with_capacity(raw_import_records.len());
    for record in &raw_import_records {
      let importer = Some(self.resolved_id.id.as_str());
      match resolve_id(&self.ctx.resolver, &record.specifier, importer, false) {
        Ok(resolved_id) => {
          debug!(
            importer = %stable_id,
            specifier = %record.specifier,
            id = %resolved_id.id,
            "resolved import"
          );
          resolved_deps.push(resolved_id);
        }
        Err(err) => errors.push(
          anyhow::Error::from(err)
            .context(format!("Could not resolve {:?} from {stable_id}", record.specifier.as_str())),
        ),
      }
    }
    if !errors.is_empty() {
      Err(errors)?;
    }

    let result = ModuleLoaderMsg::NormalModuleDone(NormalModuleTaskResult {
      module: Module::Normal(Box::new(NormalModule {
        idx: self.idx,
        is_user_defined_entry: self.is_user_defined_entry,
        id,
        stable_id,
        format: self.resolved_id.format,
        has_export_declarations,
        import_records: IndexVec::default(),
        importers: FxIndexSet::default(),
      })),
      resolved_deps,
      raw_import_records,
      warnings,
    });

    let _ = self.ctx.tx.send(result).await;

    Ok(())
  }
}
