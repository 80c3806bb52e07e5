//! TypeScript interface planning and rendering
//!
//! Emission happens in two passes. [`plan`] collects every declaration a
//! file will contain, flattening nested messages into sibling declarations
//! and recording any names that end up declared more than once. [`render`]
//! then writes the plan out as text.

use crate::location::MessageLocation;
use crate::types::map_field_type;
use prost_types::FieldDescriptorProto;
use std::fmt::{self, Write};

/// Indentation used for interface members
const INDENT: &str = "    ";

/// One `export interface` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Interface<'a> {
    /// Bare interface name
    pub name: &'a str,
    /// Fields rendered as interface members
    pub fields: &'a [FieldDescriptorProto],
}

/// Everything emitted for one root message
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    /// Leading comment lines of the root message
    pub comments: &'a [String],
    /// Nested messages, flattened to siblings of the root interface
    pub nested: Vec<Interface<'a>>,
    /// The root message itself
    pub root: Interface<'a>,
}

/// A name declared by more than one interface in the same file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    /// The duplicated interface name
    pub name: String,
    /// Root message of each section declaring the name, in emission order
    pub declared_in: Vec<String>,
}

/// All declarations of one output file
#[derive(Debug, Clone, PartialEq)]
pub struct FilePlan<'a> {
    /// Sections in root message order
    pub sections: Vec<Section<'a>>,
    /// Interface names declared more than once
    pub collisions: Vec<NameCollision>,
}

/// First pass: collect declarations and detect name collisions
pub fn plan<'a>(messages: &'a [MessageLocation<'a>]) -> FilePlan<'a> {
    let sections: Vec<Section<'a>> = messages
        .iter()
        .map(|location| Section {
            comments: &location.comments,
            nested: location
                .message
                .nested_type
                .iter()
                .map(|nested| Interface {
                    name: nested.name(),
                    fields: &nested.field,
                })
                .collect(),
            root: Interface {
                name: location.message.name(),
                fields: &location.message.field,
            },
        })
        .collect();

    let collisions = find_collisions(&sections);
    FilePlan {
        sections,
        collisions,
    }
}

fn find_collisions(sections: &[Section<'_>]) -> Vec<NameCollision> {
    // (name, declaring sections), first-declaration order
    let mut declared: Vec<(&str, Vec<String>)> = Vec::new();

    for section in sections {
        let names = section
            .nested
            .iter()
            .map(|i| i.name)
            .chain(std::iter::once(section.root.name));
        for name in names {
            let owner = section.root.name.to_string();
            match declared.iter_mut().find(|(n, _)| *n == name) {
                Some((_, owners)) => owners.push(owner),
                None => declared.push((name, vec![owner])),
            }
        }
    }

    declared
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(|(name, declared_in)| NameCollision {
            name: name.to_string(),
            declared_in,
        })
        .collect()
}

/// Second pass: render the plan into TypeScript source
pub fn render(source_name: &str, plan: &FilePlan<'_>) -> String {
    let mut out = String::new();
    write_file(&mut out, source_name, plan).expect("writing to a String cannot fail");
    out
}

fn write_file(out: &mut String, source_name: &str, plan: &FilePlan<'_>) -> fmt::Result {
    writeln!(out, "// Code generated by protoc-gen-tsdef. DO NOT EDIT.")?;
    writeln!(out, "// source: {}", source_name)?;

    for section in &plan.sections {
        writeln!(out)?;
        write_comments(out, section.comments)?;
        for nested in &section.nested {
            write_interface(out, nested)?;
            writeln!(out)?;
        }
        write_interface(out, &section.root)?;
    }

    Ok(())
}

/// Line comments keep each line verbatim, whatever it contains
fn write_comments(out: &mut String, comments: &[String]) -> fmt::Result {
    for line in comments {
        writeln!(out, "//{}", line)?;
    }
    Ok(())
}

fn write_interface(out: &mut String, interface: &Interface<'_>) -> fmt::Result {
    writeln!(out, "export interface {} {{", interface.name)?;
    for field in interface.fields {
        writeln!(out, "{}{}: {};", INDENT, field.name(), map_field_type(field))?;
    }
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::field_descriptor_proto::{Label, Type};
    use prost_types::DescriptorProto;

    fn string_field(name: &str) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_string()),
            r#type: Some(Type::String.into()),
            label: Some(Label::Optional.into()),
            ..Default::default()
        }
    }

    fn message(name: &str, nested: Vec<DescriptorProto>) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            field: vec![string_field("id")],
            nested_type: nested,
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_flattens_nested_messages() {
        let order = message("Order", vec![message("Meta", vec![]), message("Line", vec![])]);
        let locations = vec![MessageLocation {
            message: &order,
            comments: vec![],
        }];

        let plan = plan(&locations);
        assert_eq!(plan.sections.len(), 1);
        let names: Vec<&str> = plan.sections[0].nested.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Meta", "Line"]);
        assert_eq!(plan.sections[0].root.name, "Order");
        assert!(plan.collisions.is_empty());
    }

    #[test]
    fn test_plan_only_descends_one_level() {
        let deep = message("Deep", vec![]);
        let outer = message("Outer", vec![message("Inner", vec![deep])]);
        let locations = vec![MessageLocation {
            message: &outer,
            comments: vec![],
        }];

        let plan = plan(&locations);
        let names: Vec<&str> = plan.sections[0].nested.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Inner"]);
    }

    #[test]
    fn test_plan_records_nested_name_collisions() {
        let order = message("Order", vec![message("Meta", vec![])]);
        let user = message("User", vec![message("Meta", vec![])]);
        let locations = vec![
            MessageLocation {
                message: &order,
                comments: vec![],
            },
            MessageLocation {
                message: &user,
                comments: vec![],
            },
        ];

        let plan = plan(&locations);
        assert_eq!(
            plan.collisions,
            vec![NameCollision {
                name: "Meta".to_string(),
                declared_in: vec!["Order".to_string(), "User".to_string()],
            }]
        );
    }

    #[test]
    fn test_plan_records_nested_root_collision() {
        let item = message("Item", vec![]);
        let order = message("Order", vec![message("Item", vec![])]);
        let locations = vec![
            MessageLocation {
                message: &item,
                comments: vec![],
            },
            MessageLocation {
                message: &order,
                comments: vec![],
            },
        ];

        let plan = plan(&locations);
        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(plan.collisions[0].name, "Item");
    }

    #[test]
    fn test_render_comment_lines() {
        let user = message("User", vec![]);
        let locations = vec![MessageLocation {
            message: &user,
            comments: vec![" A user".to_string(), " of the system".to_string()],
        }];

        let text = render("user.proto", &plan(&locations));
        assert_eq!(
            text,
            "// Code generated by protoc-gen-tsdef. DO NOT EDIT.\n\
             // source: user.proto\n\
             \n\
             // A user\n\
             // of the system\n\
             export interface User {\n\
             \x20   id: string;\n\
             }\n"
        );
    }

    #[test]
    fn test_render_comment_containing_block_terminator() {
        let user = message("User", vec![]);
        let locations = vec![MessageLocation {
            message: &user,
            comments: vec![" matches src/*/ dirs".to_string(), "/* open".to_string()],
        }];

        let text = render("user.proto", &plan(&locations));
        let expected = "\n// matches src/*/ dirs\n///* open\nexport interface User {\n";
        assert!(text.contains(expected));
        for line in text.lines() {
            assert!(
                line.starts_with("//")
                    || line.starts_with("export interface")
                    || line.starts_with(INDENT)
                    || line == "}"
                    || line.is_empty(),
                "unexpected line outside a comment: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_render_without_comments() {
        let user = message("User", vec![]);
        let locations = vec![MessageLocation {
            message: &user,
            comments: vec![],
        }];

        let text = render("user.proto", &plan(&locations));
        assert_eq!(text.lines().filter(|l| l.starts_with("//")).count(), 2);
        assert!(text.contains("export interface User {\n    id: string;\n}\n"));
    }

    #[test]
    fn test_render_empty_file() {
        let text = render("empty.proto", &plan(&[]));
        assert_eq!(
            text,
            "// Code generated by protoc-gen-tsdef. DO NOT EDIT.\n// source: empty.proto\n"
        );
    }
}
