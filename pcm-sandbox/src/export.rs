use pcm_session::RenderBatch;
use ply_rs::{
    ply::{
        Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
        ScalarType,
    },
    writer::Writer,
};
use std::io::{self, Write};

const VERTEX_PROPERTIES: [&str; 8] = ["x", "y", "z", "nx", "ny", "nz", "s", "t"];

/// Writes a render batch as an ASCII PLY mesh with normals and texture coordinates.
pub fn export(mut writer: impl Write, batch: &RenderBatch) -> io::Result<()> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push(format!("Exported from pcm-sandbox, uv mode {}", batch.uv_mode));

    let mut vertex_element = ElementDef::new("vertex".to_string());
    for name in VERTEX_PROPERTIES {
        let p = PropertyDef::new(name.to_string(), PropertyType::Scalar(ScalarType::Float));
        vertex_element.properties.add(p);
    }
    ply.header.elements.add(vertex_element);

    let mut face_element = ElementDef::new("face".to_string());
    let vertex_list = PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::UInt),
    );
    face_element.properties.add(vertex_list);
    ply.header.elements.add(face_element);

    let vertices: Vec<DefaultElement> = batch
        .buffers
        .vertices
        .iter()
        .map(|vertex| {
            let [x, y, z] = vertex.position;
            let [nx, ny, nz] = vertex.normal;
            let [s, t] = vertex.uv;
            let mut element = DefaultElement::new();
            for (name, value) in VERTEX_PROPERTIES.iter().zip([x, y, z, nx, ny, nz, s, t]) {
                element.insert(name.to_string(), Property::Float(value));
            }
            element
        })
        .collect();

    let faces: Vec<DefaultElement> = batch
        .buffers
        .indices
        .chunks_exact(3)
        .map(|triangle| {
            let mut face = DefaultElement::new();
            face.insert(
                "vertex_indices".to_string(),
                Property::ListUInt(triangle.to_vec()),
            );
            face
        })
        .collect();

    ply.payload.insert("vertex".to_string(), vertices);
    ply.payload.insert("face".to_string(), faces);

    Writer::new().write_ply(&mut writer, &mut ply)?;
    writer.flush()
}
