//! Reduced declarative summaries of compilation units
//!
//! A summary keeps names, modifiers, type names and parameter lists, but no
//! bodies and no positions. It is the input of skeleton generation when only
//! metadata is available, and it round-trips through JSON.

use crate::ast::*;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSummary {
    pub package: Option<String>,
    pub imports: Vec<ImportSummary>,
    pub types: Vec<TypeSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSummary {
    pub name: String,
    pub is_static: bool,
    pub is_wildcard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    /// Any kind this crate does not model; rendered as a placeholder
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub type_params: Option<String>,
    /// Superclass for classes, super-interfaces for interfaces
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    /// Enum constant names
    #[serde(default)]
    pub constants: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Field type or method return type, array brackets included
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub type_params: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSummary>,
    #[serde(default)]
    pub throws: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSummary {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub varargs: bool,
    #[serde(default)]
    pub is_final: bool,
}

impl UnitSummary {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl MemberSummary {
    /// True when the member is written as a bare signature ending in `;`
    pub fn is_signature_only(&self, in_interface: bool) -> bool {
        if self.kind != MemberKind::Method {
            return false;
        }
        let has = |m: Modifier| self.modifiers.contains(&m);
        has(Modifier::Abstract)
            || has(Modifier::Native)
            || (in_interface && !has(Modifier::Default) && !has(Modifier::Static))
    }
}

/// Extract the declarative summary of a parsed compilation unit
pub fn summarize(unit: &CompilationUnit) -> UnitSummary {
    let mut summarizer = Summarizer::default();
    unit.accept(&mut summarizer);
    summarizer.summary
}

#[derive(Default)]
struct Summarizer {
    summary: UnitSummary,
}

impl Summarizer {
    fn push_type(&mut self, kind: TypeKind, name: &str, modifiers: &[Modifier], members: &[Member]) -> &mut TypeSummary {
        self.summary.types.push(TypeSummary {
            kind,
            name: name.to_string(),
            modifiers: modifiers.to_vec(),
            type_params: None,
            extends: Vec::new(),
            implements: Vec::new(),
            constants: Vec::new(),
            members: members.iter().filter_map(member_summary).collect(),
        });
        let last = self.summary.types.len() - 1;
        &mut self.summary.types[last]
    }
}

impl AstVisitor for Summarizer {
    fn visit_package_decl(&mut self, package: &PackageDecl) {
        self.summary.package = Some(package.name.clone());
    }

    fn visit_import_decl(&mut self, import: &ImportDecl) {
        self.summary.imports.push(ImportSummary {
            name: import.name.clone(),
            is_static: import.is_static,
            is_wildcard: import.is_wildcard,
        });
    }

    // Type bodies are summarized directly; the walk does not descend into them
    fn visit_class_decl(&mut self, class: &ClassDecl) {
        let summary = self.push_type(TypeKind::Class, &class.name, &class.modifiers, &class.members);
        summary.type_params = class.type_params.clone();
        summary.extends = class.extends.iter().map(ToString::to_string).collect();
        summary.implements = class.implements.iter().map(ToString::to_string).collect();
    }

    fn visit_interface_decl(&mut self, interface: &InterfaceDecl) {
        let summary = self.push_type(TypeKind::Interface, &interface.name, &interface.modifiers, &interface.members);
        summary.type_params = interface.type_params.clone();
        summary.extends = interface.extends.iter().map(ToString::to_string).collect();
    }

    fn visit_enum_decl(&mut self, enum_decl: &EnumDecl) {
        let summary = self.push_type(TypeKind::Enum, &enum_decl.name, &enum_decl.modifiers, &enum_decl.members);
        summary.implements = enum_decl.implements.iter().map(ToString::to_string).collect();
        summary.constants = enum_decl.constants.iter().map(|c| c.name.clone()).collect();
    }
}

fn parameter_summary(parameter: &Parameter) -> ParameterSummary {
    ParameterSummary {
        name: parameter.name.clone(),
        type_name: parameter.type_ref.to_string(),
        varargs: parameter.varargs,
        is_final: parameter.is_final,
    }
}

fn member_summary(member: &Member) -> Option<MemberSummary> {
    match member {
        Member::Field(f) => Some(MemberSummary {
            kind: MemberKind::Field,
            name: f.name.clone(),
            modifiers: f.modifiers.clone(),
            type_name: Some(f.type_ref.to_string()),
            type_params: None,
            parameters: Vec::new(),
            throws: Vec::new(),
        }),
        Member::Method(m) => Some(MemberSummary {
            kind: MemberKind::Method,
            name: m.name.clone(),
            modifiers: m.modifiers.clone(),
            type_name: Some(m.return_type.to_string()),
            type_params: m.type_params.clone(),
            parameters: m.parameters.iter().map(parameter_summary).collect(),
            throws: m.throws.iter().map(ToString::to_string).collect(),
        }),
        Member::Constructor(c) => Some(MemberSummary {
            kind: MemberKind::Constructor,
            name: c.name.clone(),
            modifiers: c.modifiers.clone(),
            type_name: None,
            type_params: c.type_params.clone(),
            parameters: c.parameters.iter().map(parameter_summary).collect(),
            throws: c.throws.iter().map(ToString::to_string).collect(),
        }),
        // Initializers carry no declarative metadata
        Member::Initializer(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    #[test]
    fn test_summarize_collects_declarations() {
        let unit = parse_source(
            r#"
package p;
import java.util.List;
public class A extends B implements C {
    private int x;
    static { init(); }
    public A(int x) { this.x = x; }
    public <T> List<T> items(String... names) throws Exception { return null; }
}
"#,
        );
        let summary = summarize(&unit);
        assert_eq!(summary.package.as_deref(), Some("p"));
        assert_eq!(summary.imports[0].name, "java.util.List");

        let ty = &summary.types[0];
        assert_eq!(ty.kind, TypeKind::Class);
        assert_eq!(ty.extends, vec!["B"]);
        assert_eq!(ty.implements, vec!["C"]);
        let kinds: Vec<MemberKind> = ty.members.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MemberKind::Field, MemberKind::Constructor, MemberKind::Method]);

        let method = &ty.members[2];
        assert_eq!(method.type_name.as_deref(), Some("List<T>"));
        assert_eq!(method.type_params.as_deref(), Some("<T>"));
        assert!(method.parameters[0].varargs);
        assert_eq!(method.throws, vec!["Exception"]);
    }

    #[test]
    fn test_unknown_kinds_deserialize() {
        let summary = UnitSummary::from_json(
            r#"{ "types": [ { "kind": "record", "name": "R",
                 "members": [ { "kind": "property", "name": "p" } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(summary.types[0].kind, TypeKind::Unknown);
        assert_eq!(summary.types[0].members[0].kind, MemberKind::Unknown);
    }

    #[test]
    fn test_signature_only_rules() {
        let method = |mods: Vec<Modifier>| MemberSummary {
            kind: MemberKind::Method,
            name: "m".into(),
            modifiers: mods,
            type_name: Some("void".into()),
            type_params: None,
            parameters: Vec::new(),
            throws: Vec::new(),
        };
        assert!(method(vec![Modifier::Abstract]).is_signature_only(false));
        assert!(method(vec![Modifier::Native]).is_signature_only(false));
        assert!(method(vec![]).is_signature_only(true));
        assert!(!method(vec![Modifier::Default]).is_signature_only(true));
        assert!(!method(vec![Modifier::Static]).is_signature_only(true));
        assert!(!method(vec![]).is_signature_only(false));
    }

    #[test]
    fn test_json_round_trip_preserves_summary() {
        let unit = parse_source("enum Color { RED, GREEN; public int code() { return 1; } }");
        let summary = summarize(&unit);
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"kind\": \"enum\""));
        assert_eq!(UnitSummary::from_json(&json).unwrap(), summary);
    }
}
