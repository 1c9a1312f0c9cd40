//! GraphML loader for OSMnx road-network exports.
//!
//! Only the attributes routing needs are read: node `y`/`x` (latitude and
//! longitude) and edge `length` in meters. Everything else in the document
//! is skipped. Edges are inserted in document order, so for parallel edges
//! the one that appears first in the file determines the weight.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::{GraphBuilder, GraphStore, NodeId};

const LATITUDE_ATTR: &str = "y";
const LONGITUDE_ATTR: &str = "x";
const LENGTH_ATTR: &str = "length";

/// Load a graph from a GraphML file on disk.
pub fn load_graphml(path: &Path) -> Result<GraphStore> {
    if !path.exists() {
        return Err(Error::GraphFileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "loading graphml");
    let file = File::open(path)?;
    let graph = parse_graphml(BufReader::new(file))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parse a GraphML document from any buffered reader.
pub fn parse_graphml<R: BufRead>(source: R) -> Result<GraphStore> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut keys = KeyTable::default();
    let mut nodes: Vec<PendingNode> = Vec::new();
    let mut edges: Vec<PendingEdge> = Vec::new();
    let mut current: Option<Element> = None;
    let mut data_key: Option<String> = None;
    let mut saw_graph = false;
    let mut closed_graph = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) => match tag.local_name().as_ref() {
                b"key" => keys.declare(&tag)?,
                b"graph" => saw_graph = true,
                b"node" => current = Some(Element::Node(PendingNode::open(&tag)?)),
                b"edge" => current = Some(Element::Edge(PendingEdge::open(&tag)?)),
                b"data" => data_key = attribute(&tag, b"key")?,
                _ => {}
            },
            Event::Empty(tag) => match tag.local_name().as_ref() {
                b"key" => keys.declare(&tag)?,
                b"graph" => {
                    saw_graph = true;
                    closed_graph = true;
                }
                b"node" => nodes.push(PendingNode::open(&tag)?),
                b"edge" => edges.push(PendingEdge::open(&tag)?),
                _ => {}
            },
            Event::Text(text) => {
                if let (Some(key), Some(element)) = (data_key.as_deref(), current.as_mut()) {
                    let value = text.unescape()?;
                    element.apply(&keys, key, value.trim())?;
                }
            }
            Event::End(tag) => match tag.local_name().as_ref() {
                b"data" => data_key = None,
                b"graph" => closed_graph = true,
                b"node" | b"edge" => match current.take() {
                    Some(Element::Node(node)) => nodes.push(node),
                    Some(Element::Edge(edge)) => edges.push(edge),
                    None => {}
                },
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_graph {
        return Err(Error::malformed("document has no <graph> element"));
    }
    if !closed_graph {
        return Err(Error::malformed("document ended before </graph>"));
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "graphml document parsed"
    );

    let mut builder = GraphBuilder::with_capacity(nodes.len());
    for node in nodes {
        let (Some(lat), Some(lon)) = (node.lat, node.lon) else {
            return Err(Error::malformed(format!(
                "node {} is missing its '{LATITUDE_ATTR}'/'{LONGITUDE_ATTR}' attributes",
                node.id
            )));
        };
        builder.add_node(node.id, Coordinate::new(lat, lon))?;
    }
    for edge in edges {
        builder.add_edge(edge.source, edge.target, edge.length)?;
    }

    Ok(builder.build())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Node,
    Edge,
    Other,
}

/// Maps `<data key="...">` identifiers to attribute names per domain.
#[derive(Debug, Default)]
struct KeyTable {
    names: HashMap<String, (Domain, String)>,
}

impl KeyTable {
    fn declare(&mut self, tag: &BytesStart<'_>) -> Result<()> {
        let Some(id) = attribute(tag, b"id")? else {
            return Err(Error::malformed("<key> element without an id"));
        };
        let domain = match attribute(tag, b"for")?.as_deref() {
            Some("node") => Domain::Node,
            Some("edge") => Domain::Edge,
            _ => Domain::Other,
        };
        let name = attribute(tag, b"attr.name")?.unwrap_or_else(|| id.clone());
        self.names.insert(id, (domain, name));
        Ok(())
    }

    fn resolve(&self, key: &str, domain: Domain) -> Option<&str> {
        match self.names.get(key) {
            Some((declared, name)) if *declared == domain => Some(name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PendingNode {
    id: NodeId,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl PendingNode {
    fn open(tag: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            id: required_id(tag, b"id")?,
            lat: None,
            lon: None,
        })
    }
}

#[derive(Debug)]
struct PendingEdge {
    source: NodeId,
    target: NodeId,
    length: Option<f64>,
}

impl PendingEdge {
    fn open(tag: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            source: required_id(tag, b"source")?,
            target: required_id(tag, b"target")?,
            length: None,
        })
    }
}

#[derive(Debug)]
enum Element {
    Node(PendingNode),
    Edge(PendingEdge),
}

impl Element {
    fn apply(&mut self, keys: &KeyTable, key: &str, value: &str) -> Result<()> {
        match self {
            Element::Node(node) => match keys.resolve(key, Domain::Node) {
                Some(LATITUDE_ATTR) => node.lat = Some(parse_number(value, node.id)?),
                Some(LONGITUDE_ATTR) => node.lon = Some(parse_number(value, node.id)?),
                _ => {}
            },
            Element::Edge(edge) => {
                if keys.resolve(key, Domain::Edge) == Some(LENGTH_ATTR) {
                    edge.length = Some(parse_number(value, edge.source)?);
                }
            }
        }
        Ok(())
    }
}

fn attribute(tag: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in tag.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn required_id(tag: &BytesStart<'_>, name: &[u8]) -> Result<NodeId> {
    let attr_name = String::from_utf8_lossy(name);
    let Some(raw) = attribute(tag, name)? else {
        return Err(Error::malformed(format!("missing '{attr_name}' attribute")));
    };
    raw.trim().parse().map_err(|_| {
        Error::malformed(format!(
            "'{attr_name}' value '{raw}' is not a numeric node id"
        ))
    })
}

fn parse_number(value: &str, owner: NodeId) -> Result<f64> {
    value
        .parse()
        .map_err(|_| Error::malformed(format!("invalid number '{value}' on element {owner}")))
}
