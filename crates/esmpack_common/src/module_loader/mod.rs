pub mod task_result;

use task_result::NormalModuleTaskResult;

pub enum ModuleLoaderMsg {
  NormalModuleDone(NormalModuleTaskResult),
  BuildErrors(Vec<anyhow::Error>),
}
