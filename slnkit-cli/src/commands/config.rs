//! `slnkit config`: show or change `~/.slnkit/config.yaml`.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use slnkit_loader::{config as loader_config, MissingReferencePolicy};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// What to do with project references that cannot be loaded.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub missing_references: Option<PolicyArg>,

    /// Whether loading a legacy document writes a migrated copy.
    #[arg(long, value_name = "BOOL")]
    pub migrate: Option<bool>,
}

/// Thin wrapper so clap can parse `MissingReferencePolicy`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Skip,
    Placeholder,
}

impl From<PolicyArg> for MissingReferencePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => MissingReferencePolicy::Skip,
            PolicyArg::Placeholder => MissingReferencePolicy::Placeholder,
        }
    }
}

impl ConfigArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let mut config = loader_config::load_config_at(&home).context("failed to read slnkit config")?;

        let changed = self.missing_references.is_some() || self.migrate.is_some();
        if let Some(policy) = self.missing_references {
            config.missing_references = policy.into();
        }
        if let Some(migrate) = self.migrate {
            config.migrate = migrate;
        }
        if changed {
            let path = loader_config::save_config_at(&home, &config)
                .context("failed to write slnkit config")?;
            println!("Wrote {}", path.display());
        }

        let policy = match config.missing_references {
            MissingReferencePolicy::Skip => "skip",
            MissingReferencePolicy::Placeholder => "placeholder",
        };
        println!("missing_references: {policy}");
        println!("migrate: {}", config.migrate);
        Ok(())
    }
}
