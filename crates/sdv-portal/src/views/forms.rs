//! Validation for the two write forms: create-study and add-investigator.

use sdv_core::Identity;
use sdv_core::entities::PrincipalInvestigator;
use sdv_gateway::NewStudy;

use crate::cli::commands::{AddInvestigatorArgs, CreateStudyArgs, OptionalInvestigatorArgs};

/// Build the create-study request.
///
/// Only sponsors may create studies, the title is required, and the sponsor
/// defaults to the creator's organization. The PI is sent only when its
/// name is filled in.
pub fn new_study(args: &CreateStudyArgs, identity: &Identity) -> anyhow::Result<NewStudy> {
    if !identity.is_sponsor() {
        anyhow::bail!("Only sponsors can create studies.");
    }
    let title = args.title.trim();
    if title.is_empty() {
        anyhow::bail!("Study title is required.");
    }

    let sponsor = args
        .sponsor
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| identity.organization());

    Ok(NewStudy {
        title: title.to_string(),
        protocol: args.protocol.trim().to_string(),
        sponsor: sponsor.to_string(),
        phase: non_blank(args.phase.as_deref()),
        indication: non_blank(args.indication.as_deref()),
        principal_investigator: optional_investigator(&args.investigator),
    })
}

fn optional_investigator(args: &OptionalInvestigatorArgs) -> Option<PrincipalInvestigator> {
    let name = non_blank(args.name.as_deref())?;
    let field = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_string();
    Some(PrincipalInvestigator {
        name,
        email: field(&args.email),
        institution: field(&args.institution),
        specialty: field(&args.specialty),
    })
}

/// Build the add-investigator body; every field must be filled in.
pub fn investigator(args: &AddInvestigatorArgs) -> anyhow::Result<PrincipalInvestigator> {
    let pi = PrincipalInvestigator {
        name: args.name.trim().to_string(),
        email: args.email.trim().to_string(),
        institution: args.institution.trim().to_string(),
        specialty: args.specialty.trim().to_string(),
    };
    let missing = pi.missing_fields();
    if !missing.is_empty() {
        anyhow::bail!("Please fill in all investigator fields (missing: {}).", missing.join(", "));
    }
    Ok(pi)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{michael, sarah};
    use pretty_assertions::assert_eq;

    fn create_args(title: &str) -> CreateStudyArgs {
        CreateStudyArgs {
            title: title.to_string(),
            protocol: " Open-label extension. ".to_string(),
            sponsor: None,
            phase: Some("Phase II".to_string()),
            indication: Some("  ".to_string()),
            investigator: OptionalInvestigatorArgs::default(),
        }
    }

    #[test]
    fn sponsor_defaults_to_creator_organization() {
        let study = new_study(&create_args("Diabetes Management"), &sarah()).unwrap();
        assert_eq!(study.sponsor, "Google");
        assert_eq!(study.protocol, "Open-label extension.");
        assert_eq!(study.phase.as_deref(), Some("Phase II"));
        assert_eq!(study.indication, None);
        assert_eq!(study.principal_investigator, None);
    }

    #[test]
    fn investigators_cannot_create_studies() {
        let error = new_study(&create_args("X"), &michael()).unwrap_err();
        assert_eq!(error.to_string(), "Only sponsors can create studies.");
    }

    #[test]
    fn blank_title_is_rejected() {
        let error = new_study(&create_args("   "), &sarah()).unwrap_err();
        assert_eq!(error.to_string(), "Study title is required.");
    }

    #[test]
    fn pi_included_only_when_named() {
        let mut args = create_args("Oncology");
        args.investigator.email = Some("a@b.org".into());
        assert_eq!(new_study(&args, &sarah()).unwrap().principal_investigator, None);

        args.investigator.name = Some("Dr. James Wilson".into());
        let pi = new_study(&args, &sarah())
            .unwrap()
            .principal_investigator
            .expect("pi present");
        assert_eq!(pi.name, "Dr. James Wilson");
        assert_eq!(pi.email, "a@b.org");
        assert_eq!(pi.institution, "");
    }

    #[test]
    fn add_investigator_requires_all_fields() {
        let args = AddInvestigatorArgs {
            study_id: "STD-002".into(),
            name: "Dr. James Wilson".into(),
            email: " ".into(),
            institution: "UCLA Medical Center".into(),
            specialty: String::new(),
        };
        let error = investigator(&args).unwrap_err();
        assert!(error.to_string().contains("missing: email, specialty"));
    }

    #[test]
    fn add_investigator_trims_fields() {
        let args = AddInvestigatorArgs {
            study_id: "STD-002".into(),
            name: " Dr. James Wilson ".into(),
            email: "james.wilson@site.com".into(),
            institution: "UCLA Medical Center".into(),
            specialty: "Oncology".into(),
        };
        assert_eq!(investigator(&args).unwrap().name, "Dr. James Wilson");
    }
}
