use clap::{Args, Parser, Subcommand};
use logicapp_engine::{CreateWorkflowInput, DocumentInputs, SourcePolicy};

#[derive(Debug, Parser)]
#[command(name = "logicapp", version, about = "Manage Azure Logic App workflows")]
pub struct Cli {
    /// Subscription to operate in; overrides AZURE_SUBSCRIPTION_ID.
    #[arg(long, global = true)]
    pub subscription_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new Logic App workflow
    Create(CreateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// The targeted resource group for the workflow.
    #[arg(long, short = 'g')]
    pub resource_group_name: String,

    /// The name of the workflow.
    #[arg(long, short = 'n')]
    pub name: String,

    /// App service plan name.
    #[arg(long)]
    pub app_service_plan: String,

    /// The location of the workflow; defaults to the plan's region.
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// The state of the workflow (Enabled or Disabled).
    #[arg(long)]
    pub state: Option<String>,

    /// The definition of the workflow, as JSON.
    #[arg(long, help_heading = "Definition")]
    pub definition: Option<String>,

    /// Path of a file holding the workflow definition.
    #[arg(long, help_heading = "Definition")]
    pub definition_file_path: Option<String>,

    /// URI of an externally hosted workflow definition.
    #[arg(long, help_heading = "Definition")]
    pub definition_link_uri: Option<String>,

    /// Content version of the definition link.
    #[arg(long, help_heading = "Definition")]
    pub definition_link_content_version: Option<String>,

    /// Workflow parameters, as a JSON object.
    #[arg(long, help_heading = "Parameters")]
    pub parameters: Option<String>,

    /// Path of a file holding the workflow parameters.
    #[arg(long, help_heading = "Parameters")]
    pub parameter_file_path: Option<String>,

    /// URI of externally hosted workflow parameters.
    #[arg(long, help_heading = "Parameters")]
    pub parameter_link_uri: Option<String>,

    /// Content version of the parameters link.
    #[arg(long, help_heading = "Parameters")]
    pub parameter_link_content_version: Option<String>,

    /// Fail instead of picking one when a document is given more than one way.
    #[arg(long)]
    pub reject_conflicting_sources: bool,

    /// Print the request that would be sent without creating anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateArgs {
    pub fn to_input(&self) -> CreateWorkflowInput {
        CreateWorkflowInput {
            resource_group: self.resource_group_name.clone(),
            name: self.name.clone(),
            app_service_plan: self.app_service_plan.clone(),
            location: self.location.clone(),
            state: self.state.clone(),
            definition: DocumentInputs {
                inline: self.definition.clone(),
                file_path: self.definition_file_path.clone(),
                link_uri: self.definition_link_uri.clone(),
                link_content_version: self.definition_link_content_version.clone(),
            },
            parameters: DocumentInputs {
                inline: self.parameters.clone(),
                file_path: self.parameter_file_path.clone(),
                link_uri: self.parameter_link_uri.clone(),
                link_content_version: self.parameter_link_content_version.clone(),
            },
            source_policy: if self.reject_conflicting_sources {
                SourcePolicy::RejectConflicts
            } else {
                SourcePolicy::LastWins
            },
        }
    }
}
