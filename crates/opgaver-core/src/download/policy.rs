use std::fmt;

use serde::Serialize;

/// Every step of a run that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    ListSchools,
    ListAssignments,
    AssignmentDetail,
    CreateDirectory,
    MetadataWrite,
    DescriptionFetch,
    SubmissionFetch,
    AttachmentWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailurePolicy {
    /// Abort the run
    Fatal,
    /// Emit an error event, record it in the report, continue
    Logged,
    /// Count it, continue
    Silent,
}

impl FailureKind {
    pub const ALL: [FailureKind; 8] = [
        FailureKind::ListSchools,
        FailureKind::ListAssignments,
        FailureKind::AssignmentDetail,
        FailureKind::CreateDirectory,
        FailureKind::MetadataWrite,
        FailureKind::DescriptionFetch,
        FailureKind::SubmissionFetch,
        FailureKind::AttachmentWrite,
    ];

    pub const fn policy(self) -> FailurePolicy {
        match self {
            FailureKind::ListSchools
            | FailureKind::ListAssignments
            | FailureKind::AssignmentDetail
            | FailureKind::CreateDirectory => FailurePolicy::Fatal,
            FailureKind::DescriptionFetch | FailureKind::AttachmentWrite => FailurePolicy::Logged,
            FailureKind::MetadataWrite | FailureKind::SubmissionFetch => FailurePolicy::Silent,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FailureKind::ListSchools => "list schools",
            FailureKind::ListAssignments => "list assignments",
            FailureKind::AssignmentDetail => "fetch assignment detail",
            FailureKind::CreateDirectory => "create directory",
            FailureKind::MetadataWrite => "write metadata",
            FailureKind::DescriptionFetch => "download assignment description",
            FailureKind::SubmissionFetch => "download submission document",
            FailureKind::AttachmentWrite => "write attachment",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        use FailureKind::*;
        use FailurePolicy::*;

        let table: Vec<(FailureKind, FailurePolicy)> =
            FailureKind::ALL.iter().map(|k| (*k, k.policy())).collect();

        assert_eq!(
            table,
            vec![
                (ListSchools, Fatal),
                (ListAssignments, Fatal),
                (AssignmentDetail, Fatal),
                (CreateDirectory, Fatal),
                (MetadataWrite, Silent),
                (DescriptionFetch, Logged),
                (SubmissionFetch, Silent),
                (AttachmentWrite, Logged),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FailureKind::DescriptionFetch.to_string(), "download assignment description");
    }
}
