//! XML formatting module
//!
//! Use [`Document::to_xml`] unless you need to write the XML to a file or other writer.
//!
//! Values and attribute values are written verbatim; the parser keeps them
//! verbatim too, so a written document parses back to the same tree.
use crate::{Attributes, Document, Tag, TagContent};

const TAB: &str = "\t";

/// Flatten a document as a formatted XML string using the given writer.
///
/// The `<?xml` declaration comes first, if the document has one. Then every
/// element is written on its own line, indented once per level of nesting
/// with `tab_char` (a tab if `None`).
///
/// # Errors
/// This function will return an error if the writer fails to write the XML string.
pub fn write_xml(
    writer: &mut dyn std::io::Write,
    document: &Document,
    tab_char: Option<&str>,
) -> std::io::Result<()> {
    let tab_char = tab_char.unwrap_or(TAB);

    //
    // Write the XML declaration
    if let Some(instruction) = &document.instruction {
        writer.write_all(b"<?xml")?;
        write_attributes(writer, instruction)?;
        writer.write_all(b"?>\n")?;
    }

    //
    // Write the root node
    let Some(root) = &document.root else {
        return Ok(());
    };

    let mut stack = vec![(TagTask::Open(root), 0)];
    while let Some((task, depth)) = stack.pop() {
        let tab = tab_char.repeat(depth);

        match task {
            TagTask::Close(name) => {
                writer.write_all(format!("{tab}</{name}>\n").as_bytes())?;
            }

            TagTask::Open(tag) => {
                let name = tag.name();
                writer.write_all(format!("{tab}<{name}").as_bytes())?;
                write_attributes(writer, tag.attributes())?;

                match tag.content() {
                    TagContent::Empty => writer.write_all(b"/>\n")?,

                    TagContent::Value(value) => {
                        writer.write_all(format!(">{value}</{name}>\n").as_bytes())?;
                    }

                    TagContent::Children(children) => {
                        writer.write_all(b">\n")?;
                        stack.push((TagTask::Close(name), depth));
                        for child in children.iter().rev() {
                            stack.push((TagTask::Open(child), depth + 1));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn write_attributes(writer: &mut dyn std::io::Write, attributes: &Attributes) -> std::io::Result<()> {
    for attribute in attributes {
        let (name, value) = (attribute.name(), attribute.value());
        writer.write_all(format!(r#" {name}="{value}""#).as_bytes())?;
    }
    Ok(())
}

enum TagTask<'doc> {
    Open(&'doc Tag),
    Close(&'doc str),
}
