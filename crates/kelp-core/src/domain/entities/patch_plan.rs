use crate::domain::{
    entities::answers::Answers, error::DomainError, value_objects::ScriptName,
};

/// A code fragment to splice into a named host script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPatch {
    pub script: ScriptName,
    pub code: String,
}

/// One edit applied to a host script, in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStep {
    RemoveDefault(ScriptName),
    Merge(ScriptPatch),
}

impl PatchStep {
    pub fn script(&self) -> &ScriptName {
        match self {
            Self::RemoveDefault(name) => name,
            Self::Merge(patch) => &patch.script,
        }
    }
}

const LOCAL_TSC: &str = "modules.path.join(process.cwd(), 'node_modules/.bin/tsc')";

/// Host script edits that wire the compiler and the compiled entry point
/// into `Build`, `Prep` and `Run`.
///
/// `Prep` keeps its default body; the host does not ship a failing one.
pub fn patch_plan(answers: &Answers) -> Result<Vec<PatchStep>, DomainError> {
    let build = ScriptName::new("Build")?;
    let prep = ScriptName::new("Prep")?;
    let run = ScriptName::new("Run")?;
    let compiled = answers.entry_point.compiled_path();

    Ok(vec![
        PatchStep::RemoveDefault(build.clone()),
        PatchStep::Merge(ScriptPatch {
            script: build,
            code: format!("exit(await spawn({LOCAL_TSC}, []))"),
        }),
        PatchStep::Merge(ScriptPatch {
            script: prep,
            code: format!("await cmd({LOCAL_TSC}).catch(error)"),
        }),
        PatchStep::RemoveDefault(run.clone()),
        PatchStep::Merge(ScriptPatch {
            script: run,
            code: format!("exit(await spawn('node', [\"{compiled}\", ...process.argv.slice(3)]))"),
        }),
    ])
}
