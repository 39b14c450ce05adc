//! Rendering of reduced summaries into stub source

use super::emitter::{import_text, method_header, modifiers_prefix, type_header, Emitter};
use crate::consts::STUB_BODY_MARKER;
use crate::summary::{MemberKind, MemberSummary, ParameterSummary, TypeKind, TypeSummary, UnitSummary};

/// Value returned by a synthesized body for the given return type;
/// `None` for `void`
pub fn default_return_value(type_name: &str) -> Option<&'static str> {
    let type_name = type_name.trim();
    if type_name.is_empty() || type_name == "void" {
        return None;
    }
    if type_name.ends_with(']') {
        return Some("null");
    }
    let value = match type_name {
        "boolean" => "false",
        "byte" | "short" | "int" | "long" => "0",
        "float" | "double" => "0.0",
        "char" => "'\\0'",
        _ => "null",
    };
    Some(value)
}

fn parameter_text(parameter: &ParameterSummary) -> String {
    format!(
        "{}{}{} {}",
        if parameter.is_final { "final " } else { "" },
        parameter.type_name,
        if parameter.varargs { "..." } else { "" },
        parameter.name
    )
}

impl Emitter<'_> {
    pub(super) fn emit_unit_summary(&mut self, unit: &UnitSummary) {
        let mut first_section = true;

        if let Some(package) = &unit.package {
            self.line(&format!("package {};", package));
            first_section = false;
        }

        if !unit.imports.is_empty() {
            if !first_section {
                self.blank_line();
            }
            for import in &unit.imports {
                self.line(&import_text(&import.name, import.is_static, import.is_wildcard));
            }
            first_section = false;
        }

        for summary in &unit.types {
            if !first_section {
                self.blank_line();
            }
            self.emit_type_summary(summary);
            first_section = false;
        }
    }

    pub(super) fn emit_type_summary(&mut self, summary: &TypeSummary) {
        let keyword = match summary.kind {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Unknown => return self.placeholder("type kind", &summary.name),
        };
        let header = type_header(
            keyword,
            &summary.modifiers,
            &summary.name,
            summary.type_params.as_deref(),
            &summary.extends,
            &summary.implements,
        );
        let in_interface = summary.kind == TypeKind::Interface;

        self.braced(&header, |e| {
            if summary.kind == TypeKind::Enum {
                e.emit_enum_body(
                    &summary.constants,
                    |e| e.emit_member_summaries(&summary.members, false),
                    !summary.members.is_empty(),
                );
            } else {
                e.emit_member_summaries(&summary.members, in_interface);
            }
        });
    }

    fn emit_member_summaries(&mut self, members: &[MemberSummary], in_interface: bool) {
        let mut previous: Option<MemberKind> = None;
        for member in members {
            if let Some(prev) = previous {
                if !(prev == MemberKind::Field && member.kind == MemberKind::Field) {
                    self.blank_line();
                }
            }
            self.emit_member_summary(member, in_interface);
            previous = Some(member.kind);
        }
    }

    pub(super) fn emit_member_summary(&mut self, member: &MemberSummary, in_interface: bool) {
        match member.kind {
            MemberKind::Field => {
                let type_name = member.type_name.as_deref().unwrap_or("Object");
                self.line(&format!("{}{} {};", modifiers_prefix(&member.modifiers), type_name, member.name));
            }
            MemberKind::Method | MemberKind::Constructor => {
                let is_method = member.kind == MemberKind::Method;
                let return_type = if is_method {
                    Some(member.type_name.as_deref().unwrap_or("void"))
                } else {
                    None
                };
                let parameters: Vec<String> = member.parameters.iter().map(parameter_text).collect();
                let header = method_header(
                    &member.modifiers,
                    member.type_params.as_deref(),
                    return_type,
                    &member.name,
                    &parameters,
                    &member.throws,
                );

                if member.is_signature_only(in_interface) {
                    self.line(&format!("{};", header));
                    return;
                }

                self.braced(&header, |e| {
                    e.line(STUB_BODY_MARKER);
                    if let Some(value) = return_type.and_then(default_return_value) {
                        e.line(&format!("return {};", value));
                    }
                });
            }
            MemberKind::Unknown => self.placeholder("member kind", &member.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_return_values() {
        assert_eq!(default_return_value("void"), None);
        assert_eq!(default_return_value("boolean"), Some("false"));
        assert_eq!(default_return_value("int"), Some("0"));
        assert_eq!(default_return_value("long"), Some("0"));
        assert_eq!(default_return_value("double"), Some("0.0"));
        assert_eq!(default_return_value("float"), Some("0.0"));
        assert_eq!(default_return_value("char"), Some("'\\0'"));
        assert_eq!(default_return_value("int[]"), Some("null"));
        assert_eq!(default_return_value("List<String>"), Some("null"));
    }
}
