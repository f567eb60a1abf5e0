use super::assembly_session::AssemblySession;
use crate::sbom_generation::domain::{ElementId, ElementRef};
use std::collections::{HashMap, HashSet};

/// Consistency checks run on an assembled document before it is finished.
pub struct DocumentVerifier;

impl DocumentVerifier {
    /// Returns one message per problem found; empty means the document is
    /// consistent.
    pub fn verify(session: &AssemblySession) -> Vec<String> {
        let adapter = session.adapter();
        let mut problems = Vec::new();

        let mut occurrences: HashMap<String, usize> = HashMap::new();
        for name in adapter.file_names() {
            *occurrences.entry(name).or_default() += 1;
        }
        let mut duplicates: Vec<_> = occurrences.into_iter().filter(|(_, n)| *n > 1).collect();
        duplicates.sort();
        for (name, count) in duplicates {
            problems.push(format!("File {} appears {} times", name, count));
        }

        let mut local: HashSet<ElementId> = adapter.element_ids().into_iter().collect();
        local.insert(ElementId::document());
        let documents: HashSet<String> = session.external_document_ids().into_iter().collect();
        for relationship in adapter.relationships() {
            for endpoint in [&relationship.from, &relationship.to] {
                let known = match endpoint {
                    ElementRef::Local(id) => local.contains(id),
                    ElementRef::External { document_ref, .. } => documents.contains(document_ref),
                };
                if !known {
                    problems.push(format!(
                        "Relationship {} refers to unknown element {}",
                        relationship.relationship_type, endpoint
                    ));
                }
            }
        }

        let registered: HashSet<String> =
            adapter.registered_custom_license_ids().into_iter().collect();
        for id in adapter.referenced_custom_license_ids() {
            if !id.contains(':') && !registered.contains(&id) {
                problems.push(format!("License {} is referenced but not registered", id));
            }
        }

        for problem in &problems {
            tracing::warn!("Verification: {}", problem);
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::schema::{AttributeCentricAdapter, RelationshipCentricAdapter};
    use crate::ports::outbound::{LicenseAssertionKind, LicenseCatalogSource, SchemaVersionAdapter};
    use crate::sbom_generation::domain::{
        FileKind, FileRecord, LicenseExpression, PackageInfo, Relationship, RelationshipType,
    };
    use crate::sbom_generation::services::{LicenseCatalog, LicenseResolver};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    struct EmptySource;

    impl LicenseCatalogSource for EmptySource {
        fn describe(&self) -> &str {
            "empty"
        }

        fn fetch_license_list(&self) -> crate::shared::Result<String> {
            Ok(r#"{"licenses": []}"#.to_string())
        }
    }

    fn session(adapter: Box<dyn SchemaVersionAdapter>) -> AssemblySession {
        let catalog = Arc::new(LicenseCatalog::new(None, Box::new(EmptySource)));
        AssemblySession::new(adapter, LicenseResolver::new(catalog, false))
    }

    fn file(path: &str) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            checksums: BTreeMap::new(),
            kind: FileKind::Text,
            concluded_license: LicenseExpression::NoAssertion,
            declared_license: LicenseExpression::NoAssertion,
            copyright: "NOASSERTION".into(),
            notice: String::new(),
            comment: String::new(),
            license_comment: String::new(),
            contributors: Vec::new(),
        }
    }

    #[test]
    fn test_consistent_document_has_no_problems() {
        for adapter in [
            Box::new(AttributeCentricAdapter::new()) as Box<dyn SchemaVersionAdapter>,
            Box::new(RelationshipCentricAdapter::new("https://example.org/doc")),
        ] {
            let mut session = session(adapter);
            let package = session.adapter_mut().materialize_package(PackageInfo::new("demo"));
            let file_id = session.adapter_mut().materialize_file(&file("./a.txt"));
            session.adapter_mut().materialize_relationship(Relationship::new(
                package.clone().into(),
                RelationshipType::Contains,
                file_id.into(),
            ));
            session.adapter_mut().materialize_relationship(Relationship::new(
                ElementId::document().into(),
                RelationshipType::Describes,
                package.into(),
            ));

            assert!(DocumentVerifier::verify(&session).is_empty());
        }
    }

    #[test]
    fn test_reports_duplicate_files_and_unknown_endpoints() {
        let mut session = session(Box::new(AttributeCentricAdapter::new()));
        let package = session.adapter_mut().materialize_package(PackageInfo::new("demo"));
        session.adapter_mut().materialize_file(&file("./a.txt"));
        session.adapter_mut().materialize_file(&file("./a.txt"));
        session.adapter_mut().materialize_relationship(Relationship::new(
            package.into(),
            RelationshipType::DependsOn,
            ElementRef::External {
                document_ref: "DocumentRef-missing".into(),
                element_id: "SPDXRef-Package-1".into(),
            },
        ));

        let problems = DocumentVerifier::verify(&session);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("./a.txt appears 2 times"));
        assert!(problems[1].contains("DocumentRef-missing"));
    }

    #[test]
    fn test_reports_unregistered_custom_license() {
        let mut session = session(Box::new(AttributeCentricAdapter::new()));
        let package = session.adapter_mut().materialize_package(PackageInfo::new("demo"));
        session.adapter_mut().materialize_license_assertion(
            &package,
            LicenseAssertionKind::Declared,
            &LicenseExpression::Custom("LicenseRef-Missing".into()),
        );
        assert_eq!(DocumentVerifier::verify(&session).len(), 1);

        session.register_missing_custom_licenses();
        assert!(DocumentVerifier::verify(&session).is_empty());
    }
}
