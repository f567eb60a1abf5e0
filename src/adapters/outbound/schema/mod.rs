//! Schema version strategies behind the `SchemaVersionAdapter` port.

mod attribute_centric;
mod relationship_centric;

pub use attribute_centric::AttributeCentricAdapter;
pub use relationship_centric::RelationshipCentricAdapter;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{LicenseAssertionKind, SchemaVersionAdapter};
    use crate::sbom_generation::domain::{
        ChecksumAlgorithm, CustomLicense, ElementId, ElementRef, FileKind, FileRecord,
        LicenseExpression, PackageInfo, Relationship, RelationshipType,
    };
    use std::collections::{BTreeMap, BTreeSet};

    fn license(text: &str) -> LicenseExpression {
        LicenseExpression::parse(text).unwrap()
    }

    fn vendored_file() -> FileRecord {
        FileRecord {
            path: "./src/vendored.c".into(),
            checksums: BTreeMap::from([(ChecksumAlgorithm::Sha1, "cc".repeat(20))]),
            kind: FileKind::Source,
            concluded_license: license("LicenseRef-Acme"),
            declared_license: license("LicenseRef-Acme AND MIT"),
            copyright: "NOASSERTION".into(),
            notice: String::new(),
            comment: String::new(),
            license_comment: String::new(),
            contributors: Vec::new(),
        }
    }

    /// Feeds the same calls to an adapter and names the elements it created.
    fn assemble(adapter: &mut dyn SchemaVersionAdapter) -> Vec<(ElementId, &'static str)> {
        adapter.register_custom_license(&CustomLicense::new("LicenseRef-Acme", "Acme terms"));

        let app = adapter.materialize_package(PackageInfo::new("app"));
        adapter.materialize_license_assertion(
            &app,
            LicenseAssertionKind::Declared,
            &license("Apache-2.0 OR MIT"),
        );
        adapter.materialize_license_assertion(&app, LicenseAssertionKind::Concluded, &license("Apache-2.0"));

        let file = vendored_file();
        let file_id = adapter.materialize_file(&file);
        adapter.materialize_relationship(Relationship::new(
            app.clone().into(),
            RelationshipType::Contains,
            file_id.clone().into(),
        ));
        adapter.materialize_license_assertion(
            &app,
            LicenseAssertionKind::InfoFromFiles,
            &file.declared_license,
        );

        let junit = adapter.materialize_package(PackageInfo::new("junit"));
        adapter.materialize_relationship(Relationship::new(
            junit.clone().into(),
            RelationshipType::TestDependencyOf,
            app.clone().into(),
        ));
        let plugin = adapter.materialize_package(PackageInfo::new("plugin"));
        adapter.materialize_relationship(Relationship::new(
            plugin.clone().into(),
            RelationshipType::OptionalComponentOf,
            app.clone().into(),
        ));

        vec![(app, "app"), (file_id, "file"), (junit, "junit"), (plugin, "plugin")]
    }

    fn name_of(names: &[(ElementId, &'static str)], element: &ElementRef) -> &'static str {
        let id = element.local().unwrap();
        names.iter().find(|(known, _)| known == id).unwrap().1
    }

    fn edges(
        adapter: &dyn SchemaVersionAdapter,
        names: &[(ElementId, &'static str)],
    ) -> BTreeSet<(&'static str, RelationshipType, &'static str)> {
        adapter
            .relationships()
            .iter()
            .map(|r| (name_of(names, &r.from), r.relationship_type, name_of(names, &r.to)))
            .collect()
    }

    #[test]
    fn test_both_schemas_read_back_the_same_statements() {
        let mut attribute = AttributeCentricAdapter::new();
        let mut relationship = RelationshipCentricAdapter::new("https://example.org/demo");
        let attribute_names = assemble(&mut attribute);
        let relationship_names = assemble(&mut relationship);

        for ((attribute_id, name), (relationship_id, _)) in
            attribute_names.iter().zip(&relationship_names)
        {
            for kind in [
                LicenseAssertionKind::Declared,
                LicenseAssertionKind::Concluded,
                LicenseAssertionKind::InfoFromFiles,
            ] {
                assert_eq!(
                    attribute.asserted_license(attribute_id, kind),
                    relationship.asserted_license(relationship_id, kind),
                    "{} {:?}",
                    name,
                    kind
                );
            }
        }
        assert_eq!(
            attribute.asserted_license(&attribute_names[0].0, LicenseAssertionKind::InfoFromFiles),
            Some(license("LicenseRef-Acme AND MIT"))
        );

        let expected = BTreeSet::from([
            ("app", RelationshipType::Contains, "file"),
            ("junit", RelationshipType::TestDependencyOf, "app"),
            ("plugin", RelationshipType::OptionalComponentOf, "app"),
        ]);
        assert_eq!(edges(&attribute, &attribute_names), expected);
        assert_eq!(edges(&relationship, &relationship_names), expected);
    }
}
