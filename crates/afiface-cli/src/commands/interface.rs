use super::load_model_and_layout;
use crate::cli::InterfaceArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::output;
use crate::utils::parser;
use afiface::core::io::contacts;
use afiface::core::models::interface::ContactObservation;
use afiface::engine::config::{InterfaceConfig, InterfaceScope, InterfaceSource};
use afiface::workflows;
use tracing::{info, warn};

fn interface_scope(args: &InterfaceArgs) -> Result<InterfaceScope> {
    let argument_error = |e: parser::ParseError| CliError::Argument(e.to_string());
    if let Some(chains) = &args.chains {
        return Ok(InterfaceScope::Chains(
            parser::parse_chain_set(chains).map_err(argument_error)?,
        ));
    }
    if let Some(between) = &args.between {
        let (group_a, group_b) = parser::parse_group_pair(between).map_err(argument_error)?;
        return Ok(InterfaceScope::Between { group_a, group_b });
    }
    Ok(InterfaceScope::All)
}

async fn contact_observations(
    args: &InterfaceArgs,
    config: &PartialAppConfig,
) -> Result<Vec<ContactObservation>> {
    if let Some(path) = &args.contacts {
        info!("Reading contact table from {:?}", path);
        return Ok(contacts::read_contacts(path)?);
    }

    let runner = config.contact_runner();
    if !runner.is_available().await {
        return Err(CliError::Data(format!(
            "no contact data available: contact program '{}' not found (pass --contacts to use a precomputed table)",
            runner.program()
        )));
    }
    info!("Computing inter-chain contacts for {:?}", args.pdb);
    match runner.run(&args.pdb).await {
        Some(text) => Ok(contacts::parse_contacts(&text)?),
        None => {
            warn!("No contact data available for {:?}", args.pdb);
            Err(CliError::Data(format!(
                "no contact data available for '{}'",
                args.pdb.display()
            )))
        }
    }
}

pub async fn run(args: InterfaceArgs, config: &PartialAppConfig) -> Result<()> {
    let settings = config.output_settings(&args.output);
    let scope = interface_scope(&args)?;
    let (model, layout) = load_model_and_layout(&args.model, &args.fasta)?;

    let (source, observations) = if args.all_residues {
        info!("Treating every residue as interface residue.");
        (InterfaceSource::AllResidues, Vec::new())
    } else {
        (
            InterfaceSource::Contacts,
            contact_observations(&args, config).await?,
        )
    };

    let interface_config = InterfaceConfig { source, scope };
    let report = tokio::task::block_in_place(|| {
        workflows::interface_plddt::run(&model, &layout, &observations, &interface_config)
    })?;

    output::write_interface_report(std::io::stdout().lock(), &report, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::collections::HashSet;

    fn interface_args(extra: &[&str]) -> InterfaceArgs {
        let mut argv = vec!["afiface", "interface", "m.json", "m.pdb", "--fasta", "s.fasta"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Interface(args) => args,
            other => panic!("expected interface command, got {other:?}"),
        }
    }

    #[test]
    fn scope_defaults_to_all_chains() {
        assert_eq!(
            interface_scope(&interface_args(&[])).unwrap(),
            InterfaceScope::All
        );
    }

    #[test]
    fn scope_from_chain_list() {
        let scope = interface_scope(&interface_args(&["--chains", "A,C"])).unwrap();
        assert_eq!(scope, InterfaceScope::Chains(HashSet::from(['A', 'C'])));
    }

    #[test]
    fn scope_from_group_pair() {
        let scope = interface_scope(&interface_args(&["--between", "A,B:C"])).unwrap();
        assert_eq!(
            scope,
            InterfaceScope::Between {
                group_a: HashSet::from(['A', 'B']),
                group_b: HashSet::from(['C']),
            }
        );
    }

    #[test]
    fn malformed_group_pair_is_an_argument_error() {
        let result = interface_scope(&interface_args(&["--between", "A,B"]));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[tokio::test]
    async fn missing_contact_program_means_no_contact_data() {
        let args = interface_args(&[]);
        let config = PartialAppConfig::load(
            None,
            &["contacts.program=afiface-missing-contact-program".to_string()],
        )
        .unwrap();
        let result = contact_observations(&args, &config).await;
        match result {
            Err(CliError::Data(message)) => {
                assert!(message.contains("afiface-missing-contact-program"))
            }
            other => panic!("expected a data error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn contact_table_file_bypasses_the_contact_program() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("contacts.tsv");
        std::fs::write(
            &table,
            "ID1_chainID ID1_resSeq ID2_chainID ID2_resSeq area\nA\t1\tB\t2\t3.0\n",
        )
        .unwrap();
        let args = interface_args(&["--contacts", table.to_str().unwrap()]);
        let config = PartialAppConfig::load(
            None,
            &["contacts.program=afiface-missing-contact-program".to_string()],
        )
        .unwrap();
        let observations = contact_observations(&args, &config).await.unwrap();
        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn chains_and_between_conflict() {
        let result = Cli::try_parse_from([
            "afiface", "interface", "m.json", "m.pdb", "--fasta", "s.fasta", "--chains", "A",
            "--between", "A:B",
        ]);
        assert!(result.is_err());
    }
}
