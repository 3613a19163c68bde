use dialoguer::{Confirm, Input, MultiSelect, Select};

use shipset_core::{BumpLevel, PackageInfo};
use shipset_engine::traits::{
    BumpSelection, InteractionProvider, PackageSelection, SummaryInput,
};
use shipset_engine::{EngineError, Result};

const BUMP_CHOICES: [(BumpLevel, &str); 3] = [
    (BumpLevel::Patch, "patch - Bug fixes and improvements"),
    (BumpLevel::Minor, "minor - New features"),
    (BumpLevel::Major, "major - Breaking changes"),
];

pub(crate) struct TerminalInteractionProvider;

impl TerminalInteractionProvider {
    pub(crate) fn new() -> Self {
        Self
    }
}

fn dialoguer_error(e: dialoguer::Error) -> EngineError {
    match e {
        dialoguer::Error::IO(io_err) => EngineError::Io(io_err),
    }
}

impl InteractionProvider for TerminalInteractionProvider {
    fn select_packages(&self, available: &[PackageInfo]) -> Result<PackageSelection> {
        let items: Vec<String> = available
            .iter()
            .map(|p| format!("{} ({})", p.name, p.version))
            .collect();

        let selection = MultiSelect::new()
            .with_prompt("Which packages does this change affect?")
            .items(&items)
            .interact_opt()
            .map_err(dialoguer_error)?;

        match selection {
            Some(indices) => Ok(PackageSelection::Selected(
                indices
                    .into_iter()
                    .filter_map(|i| available.get(i).cloned())
                    .collect(),
            )),
            None => Ok(PackageSelection::Cancelled),
        }
    }

    fn select_bump(&self) -> Result<BumpSelection> {
        let labels: Vec<&str> = BUMP_CHOICES.iter().map(|(_, label)| *label).collect();

        let selection = Select::new()
            .with_prompt("What kind of change is this?")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(dialoguer_error)?;

        let Some(index) = selection else {
            return Ok(BumpSelection::Cancelled);
        };
        let level = BUMP_CHOICES[index].0;

        if level == BumpLevel::Major {
            let confirmed = Confirm::new()
                .with_prompt("Major bumps are for breaking changes only. Are you sure?")
                .default(false)
                .interact_opt()
                .map_err(dialoguer_error)?;
            if confirmed != Some(true) {
                return Ok(BumpSelection::Cancelled);
            }
        }

        Ok(BumpSelection::Selected(level))
    }

    fn summary(&self) -> Result<SummaryInput> {
        let text: String = Input::new()
            .with_prompt("Describe the change (used in the changelog)")
            .interact_text()
            .map_err(dialoguer_error)?;

        Ok(SummaryInput::Provided(text))
    }
}

/// Used when stdin is not a terminal; every prompt is a hard error telling
/// the user to pass the value as a flag instead.
pub(crate) struct NonInteractiveProvider;

impl InteractionProvider for NonInteractiveProvider {
    fn select_packages(&self, _available: &[PackageInfo]) -> Result<PackageSelection> {
        Err(EngineError::InteractionRequired)
    }

    fn select_bump(&self) -> Result<BumpSelection> {
        Err(EngineError::InteractionRequired)
    }

    fn summary(&self) -> Result<SummaryInput> {
        Err(EngineError::InteractionRequired)
    }
}
