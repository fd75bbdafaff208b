//! Graph to GDF text.

use tracing::{trace, warn};

use crate::codec::gdf::EncodeOptions;
use crate::codec::infer::{infer_column_type, ColumnFormat};
use crate::codec::primitives::RowWriter;
use crate::codec::schema::{Section, DIRECTED_COLUMN, NODE_ID_COLUMN, SOURCE_COLUMN, TARGET_COLUMN};
use crate::model::{Attributes, DeclaredType, GraphStore};

/// One attribute column of the output.
struct OutputColumn {
    name: String,
    format: ColumnFormat,
}

/// Writes `graph` as GDF text: the node section, then the edge section.
pub fn serialize<G: GraphStore + ?Sized>(graph: &G, options: &EncodeOptions) -> String {
    let mut writer = RowWriter::with_capacity(64 * (graph.node_count() + graph.edge_count()) + 64);

    let node_columns = output_columns(
        Section::Nodes,
        options.node_attrs.pick(graph.node_attribute_names()),
        &[NODE_ID_COLUMN],
        || graph.nodes().map(|n| n.attributes),
    );
    let header = [(NODE_ID_COLUMN, Some(ColumnFormat::TEXT.declared()))];
    writer.write_header(Section::Nodes, header.into_iter().chain(typed(&node_columns)));
    for node in graph.nodes() {
        writer.write_quoted(node.id);
        write_attributes(&mut writer, &node_columns, node.attributes);
        writer.end_row();
    }

    let edge_columns = output_columns(
        Section::Edges,
        options.edge_attrs.pick(graph.edge_attribute_names()),
        &[SOURCE_COLUMN, TARGET_COLUMN],
        || graph.edges().map(|e| e.attributes),
    );
    let directed_column = graph.is_directed() && !edge_columns.iter().any(|c| c.name == DIRECTED_COLUMN);
    let header = [(SOURCE_COLUMN, None), (TARGET_COLUMN, None)];
    let synthetic = directed_column.then_some((DIRECTED_COLUMN, Some(DeclaredType::Boolean)));
    writer.write_header(
        Section::Edges,
        header.into_iter().chain(typed(&edge_columns)).chain(synthetic),
    );
    for edge in graph.edges() {
        writer.write_quoted(edge.source);
        writer.write_quoted(edge.target);
        write_attributes(&mut writer, &edge_columns, edge.attributes);
        if directed_column {
            writer.write_bare("true");
        }
        writer.end_row();
    }

    writer.into_string()
}

fn output_columns<'g, I>(
    section: Section,
    names: Vec<String>,
    reserved: &[&str],
    tables: impl Fn() -> I,
) -> Vec<OutputColumn>
where
    I: Iterator<Item = &'g Attributes>,
{
    names
        .into_iter()
        .filter(|name| {
            let clash = reserved.contains(&name.as_str());
            if clash {
                warn!(%section, column = %name, "skipping attribute that clashes with an identifier column");
            }
            !clash
        })
        .map(|name| {
            let format = infer_column_type(tables().filter_map(|attrs| attrs.get(&name)));
            trace!(%section, column = %name, declared = %format.declared(), "inferred column type");
            OutputColumn { name, format }
        })
        .collect()
}

fn typed(columns: &[OutputColumn]) -> impl Iterator<Item = (&str, Option<DeclaredType>)> {
    columns
        .iter()
        .map(|c| (c.name.as_str(), Some(c.format.declared())))
}

fn write_attributes(writer: &mut RowWriter, columns: &[OutputColumn], attributes: &Attributes) {
    for column in columns {
        match attributes.get(&column.name) {
            Some(value) => column.format.write_value(writer, value),
            None => writer.write_empty(),
        }
    }
}
