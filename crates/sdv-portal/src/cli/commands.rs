use clap::{Args, Subcommand, ValueEnum};
use sdv_auth::{Provider, Route};
use sdv_core::Role;
use sdv_core::enums::StudyStatus;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in through one of the mock SSO providers.
    Login(LoginArgs),
    /// Sign out and clear the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Navigate to a route (/dashboard, /studies, /create-study, /study/<id>).
    Open(OpenArgs),
    /// List studies.
    Studies(StudiesArgs),
    /// Show one study.
    Study(StudyArgs),
    /// Create a study (sponsors only).
    CreateStudy(CreateStudyArgs),
    /// Attach a principal investigator to a study.
    AddInvestigator(AddInvestigatorArgs),
    /// List portal users.
    Users(UsersArgs),
    /// List CRF templates.
    CrfFiles,
    /// Portal database statistics.
    Stats,
    /// Check both APIs are up.
    Health,
    /// Browse trial-site patient documents.
    Documents(DocumentsArgs),
    /// Open a trial-site document or CRF template in the system browser.
    Download(DownloadArgs),
    /// Site side: wait for sponsor access requests and answer them.
    WatchAccess(WatchAccessArgs),
    /// Sponsor side: ask a study's investigator for site access.
    RequestAccess(RequestAccessArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// google, veera or medidata.
    #[arg(long)]
    pub provider: Provider,
    /// Account number from the provider's list. Omit to show the list.
    #[arg(long)]
    pub account: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct OpenArgs {
    pub route: Route,
}

#[derive(Clone, Debug, Args)]
pub struct StudiesArgs {
    /// draft, active, completed or on-hold.
    #[arg(long)]
    pub status: Option<StudyStatus>,
    #[arg(long)]
    pub sponsor: Option<String>,
    /// Investigators: only studies with a site you run.
    #[arg(long)]
    pub mine: bool,
}

#[derive(Clone, Debug, Args)]
pub struct StudyArgs {
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct CreateStudyArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub protocol: String,
    /// Defaults to your organization.
    #[arg(long)]
    pub sponsor: Option<String>,
    #[arg(long)]
    pub phase: Option<String>,
    #[arg(long)]
    pub indication: Option<String>,
    #[command(flatten)]
    pub investigator: OptionalInvestigatorArgs,
}

/// PI fields on study creation; the PI is sent only when a name is given.
#[derive(Clone, Debug, Default, Args)]
pub struct OptionalInvestigatorArgs {
    #[arg(long = "pi-name")]
    pub name: Option<String>,
    #[arg(long = "pi-email")]
    pub email: Option<String>,
    #[arg(long = "pi-institution")]
    pub institution: Option<String>,
    #[arg(long = "pi-specialty")]
    pub specialty: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AddInvestigatorArgs {
    pub study_id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub institution: String,
    #[arg(long)]
    pub specialty: String,
}

#[derive(Clone, Debug, Args)]
pub struct UsersArgs {
    #[arg(long)]
    pub company: Option<String>,
    /// Sponsor or Investigator.
    #[arg(long)]
    pub role: Option<Role>,
}

#[derive(Clone, Debug, Args)]
pub struct DocumentsArgs {
    /// Show one patient's documents in detail.
    #[arg(long)]
    pub patient: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DownloadArgs {
    /// Served path, e.g. /patients/P001/visit1.docx
    pub path: String,
    /// Treat the argument as a CRF template name from `sdv crf-files`.
    #[arg(long)]
    pub crf: bool,
    /// Print the URL instead of launching a browser.
    #[arg(long)]
    pub print: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    #[must_use]
    pub const fn granted(self) -> bool {
        matches!(self, Self::Yes)
    }
}

#[derive(Clone, Debug, Args)]
pub struct WatchAccessArgs {
    /// Answer every request automatically instead of prompting.
    #[arg(long)]
    pub answer: Option<Answer>,
    /// Stop after the first answered request.
    #[arg(long)]
    pub once: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RequestAccessArgs {
    pub study_id: String,
}
