//! JSON dump of the artifact, for tooling that does not run JavaScript.

use crate::artifact::GeneratedArtifact;
use crate::traits::Backend;

pub static JSON_BACKEND: JsonBackend = JsonBackend;

pub struct JsonBackend;

impl Backend for JsonBackend {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn generate(&self, artifact: &GeneratedArtifact) -> String {
        let mut out = serde_json::to_string_pretty(artifact)
            .expect("artifact holds only strings, finite numbers and sequences");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldDeclaration, Primitive, TypeDeclaration};
    use crate::policy::Policy;

    #[test]
    fn test_json_dump() {
        let decls = vec![TypeDeclaration::new(
            "Course",
            vec![FieldDeclaration::required("code", Primitive::String.into()).readonly()],
        )];
        let artifact = GeneratedArtifact::build("types.ts", &decls, &Policy::default());
        let value: serde_json::Value =
            serde_json::from_str(&JSON_BACKEND.generate(&artifact)).unwrap();
        assert_eq!(value["validators"][0][0], "course");
        assert_eq!(value["immutable"][0][1][0], "code");
        assert_eq!(value["schemas"][0]["properties"][3]["validator"], "String");
    }
}
