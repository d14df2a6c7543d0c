//! MEI document emitter (consumes IR from `crate::ir`)
//!
//! Writes one `staff` per converted staff inside a single `section`, and one
//! facsimile `zone` per glyph that produced output. Elements point at their
//! zone through `@facs`.

use crate::config::MeiVersion;
use crate::errors::Result;
use crate::ir::{ConvertedStaff, Neume, StaffItem, Syllable, Zone};
use crate::models::component::{FacsimileRef, NeumeComponent};

use super::builder::{MeiBuilder, MEI_NAMESPACE};

/// Neume notation staves have four lines
const STAFF_LINES: &str = "4";

/// Emit an MEI document for the converted staves
pub fn emit_mei(staves: &[ConvertedStaff], version: MeiVersion) -> Result<String> {
    let mut builder = MeiBuilder::new()?;

    builder.start("mei", &[("xmlns", MEI_NAMESPACE), ("meiversion", version.as_str())])?;
    write_head(&mut builder)?;

    builder.start("music", &[])?;
    write_facsimile(&mut builder, staves)?;

    builder.start("body", &[])?;
    builder.start("mdiv", &[])?;
    builder.start("score", &[])?;
    write_score_def(&mut builder, staves)?;

    builder.start("section", &[])?;
    for staff in staves {
        write_staff(&mut builder, staff)?;
    }

    let mei = builder.finish()?;
    log::info!("Emitted MEI {} for {} staves", version.as_str(), staves.len());
    Ok(mei)
}

fn write_head(builder: &mut MeiBuilder) -> Result<()> {
    builder.start("meiHead", &[])?;
    builder.start("fileDesc", &[])?;
    builder.start("titleStmt", &[])?;
    builder.empty("title", &[])?;
    builder.end()?;
    builder.empty("pubStmt", &[])?;
    builder.end()?;
    builder.end()
}

fn write_facsimile(builder: &mut MeiBuilder, staves: &[ConvertedStaff]) -> Result<()> {
    builder.start("facsimile", &[])?;
    builder.start("surface", &[])?;
    for zone in staves.iter().flat_map(|s| s.zones.iter()) {
        write_zone(builder, zone)?;
    }
    builder.end()?;
    builder.end()
}

fn write_zone(builder: &mut MeiBuilder, zone: &Zone) -> Result<()> {
    let bbox = zone.bounding_box;
    let id = zone.id();
    let ulx = bbox.left().to_string();
    let uly = bbox.top().to_string();
    let lrx = bbox.right().to_string();
    let lry = bbox.bottom().to_string();
    builder.empty(
        "zone",
        &[("xml:id", id.as_str()), ("ulx", ulx.as_str()), ("uly", uly.as_str()), ("lrx", lrx.as_str()), ("lry", lry.as_str())],
    )
}

fn write_score_def(builder: &mut MeiBuilder, staves: &[ConvertedStaff]) -> Result<()> {
    builder.start("scoreDef", &[])?;
    builder.start("staffGrp", &[])?;
    for staff in staves {
        let n = staff_number(staff);
        let clef_shape = staff.clef_letter.map(|letter| letter.letter().to_ascii_uppercase().to_string());
        let mut attributes = vec![("n", n.as_str()), ("lines", STAFF_LINES), ("notationtype", "neume")];
        if let Some(shape) = clef_shape.as_deref() {
            attributes.push(("clef.shape", shape));
        }
        builder.empty("staffDef", &attributes)?;
    }
    builder.end()?;
    builder.end()
}

fn write_staff(builder: &mut MeiBuilder, staff: &ConvertedStaff) -> Result<()> {
    let n = staff_number(staff);
    builder.start("staff", &[("n", n.as_str())])?;
    builder.start("layer", &[])?;

    for item in &staff.items {
        match item {
            StaffItem::Clef { glyph_index, shape } => {
                let facs = zone_ref(staff.index, *glyph_index);
                let shape = shape.letter().to_ascii_uppercase().to_string();
                builder.empty("clef", &[("shape", shape.as_str()), ("facs", facs.as_str())])?;
            }
            StaffItem::Custos { glyph_index, pitch } => {
                let facs = zone_ref(staff.index, *glyph_index);
                match pitch {
                    Some(pitch) => {
                        let pname = pitch.note.letter().to_string();
                        let oct = pitch.octave.to_string();
                        builder.empty("custos", &[("pname", pname.as_str()), ("oct", oct.as_str()), ("facs", facs.as_str())])?;
                    }
                    None => builder.empty("custos", &[("facs", facs.as_str())])?,
                }
            }
            StaffItem::Division { glyph_index, form } => {
                let facs = zone_ref(staff.index, *glyph_index);
                match form.as_deref() {
                    Some(form) => builder.empty("divLine", &[("form", form), ("facs", facs.as_str())])?,
                    None => builder.empty("divLine", &[("facs", facs.as_str())])?,
                }
            }
            StaffItem::Syllable(syllable) => write_syllable(builder, staff.index, syllable)?,
        }
    }

    builder.end()?;
    builder.end()
}

fn write_syllable(builder: &mut MeiBuilder, staff_index: usize, syllable: &Syllable) -> Result<()> {
    builder.start("syllable", &[])?;
    builder.empty("syl", &[])?;
    for neume in &syllable.neumes {
        write_neume(builder, staff_index, neume)?;
    }
    builder.end()
}

fn write_neume(builder: &mut MeiBuilder, staff_index: usize, neume: &Neume) -> Result<()> {
    let facs = zone_ref(staff_index, neume.glyph_index);
    builder.start("neume", &[("type", neume.name.as_str()), ("facs", facs.as_str())])?;
    for component in &neume.components {
        write_nc(builder, component)?;
    }
    builder.end()
}

fn write_nc(builder: &mut MeiBuilder, nc: &NeumeComponent) -> Result<()> {
    let pname = nc.pitch.note.letter().to_string();
    let oct = nc.pitch.octave.to_string();
    let facs = nc.facsimile.map(|f| format!("#{}", f.zone_id()));

    let mut attributes: Vec<(&str, &str)> = vec![("pname", pname.as_str()), ("oct", oct.as_str())];
    if let Some(direction) = nc.intermediate_direction {
        attributes.push(("intm", direction.code()));
    }
    if let Some(connection) = nc.connection_type {
        attributes.push(("con", connection.code()));
    }
    if let Some(curve) = nc.curve {
        attributes.push(("curve", curve.code()));
    }
    if let Some(tilt) = nc.tilt {
        attributes.push(("tilt", tilt.code()));
    }
    if nc.ligature {
        attributes.push(("ligated", "true"));
    }
    if nc.angled {
        attributes.push(("angled", "true"));
    }
    if nc.hooked {
        attributes.push(("hooked", "true"));
    }
    if let Some(facs) = facs.as_deref() {
        attributes.push(("facs", facs));
    }

    if nc.liques {
        builder.start("nc", &attributes)?;
        builder.empty("liquescent", &[])?;
        builder.end()
    } else {
        builder.empty("nc", &attributes)
    }
}

fn staff_number(staff: &ConvertedStaff) -> String {
    (staff.index + 1).to_string()
}

fn zone_ref(staff_index: usize, glyph_index: usize) -> String {
    format!("#{}", FacsimileRef::new(staff_index, glyph_index).zone_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;
    use crate::ir::StaffConverter;
    use crate::models::glyph::{BoundingBox, Glyph, Staff};
    use crate::models::pitch::{Note, Pitch};

    fn glyph(name: &str, x: i32, pitch: Option<Pitch>) -> Glyph {
        Glyph::new(name, pitch, Note::C, 0, BoundingBox::new(x, 100, 20, 30))
    }

    fn emit(glyphs: Vec<Glyph>, version: MeiVersion) -> String {
        let staff = Staff::new(0, glyphs);
        let converted = StaffConverter::new(&ConversionConfig::default())
            .unwrap()
            .convert_staff(&staff)
            .unwrap();
        emit_mei(&[converted], version).unwrap()
    }

    #[test]
    fn test_document_skeleton() {
        let xml = emit(vec![glyph("clef.c", 0, None)], MeiVersion::V5);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();

        assert_eq!(root.tag_name().name(), "mei");
        assert_eq!(root.tag_name().namespace(), Some(MEI_NAMESPACE));
        assert_eq!(root.attribute("meiversion"), Some("5.0"));
        for name in ["meiHead", "facsimile", "surface", "scoreDef", "staffDef", "section", "layer"] {
            assert!(
                doc.descendants().any(|n| n.has_tag_name((MEI_NAMESPACE, name))),
                "missing <{}>",
                name
            );
        }
    }

    #[test]
    fn test_clivis_components() {
        let xml = emit(vec![glyph("neume.clivis.2", 40, Some(Pitch::new(Note::D, 4)))], MeiVersion::V4);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let ncs: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("nc")).collect();

        assert_eq!(ncs.len(), 2);
        assert_eq!(ncs[0].attribute("pname"), Some("d"));
        assert_eq!(ncs[0].attribute("oct"), Some("4"));
        assert_eq!(ncs[0].attribute("intm"), None);
        assert_eq!(ncs[1].attribute("pname"), Some("c"));
        assert_eq!(ncs[1].attribute("intm"), Some("d"));
        assert_eq!(ncs[1].attribute("facs"), Some("#zone-s1-g1"));
    }

    #[test]
    fn test_zone_coordinates() {
        let xml = emit(vec![glyph("neume.punctum", 40, Some(Pitch::new(Note::D, 4)))], MeiVersion::V4);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let zone = doc.descendants().find(|n| n.has_tag_name("zone")).unwrap();

        assert_eq!(zone.attribute(("http://www.w3.org/XML/1998/namespace", "id")), Some("zone-s1-g1"));
        assert_eq!(zone.attribute("ulx"), Some("40"));
        assert_eq!(zone.attribute("lrx"), Some("60"));
        assert_eq!(zone.attribute("lry"), Some("130"));
    }

    #[test]
    fn test_liquescent_child_and_flags() {
        let xml = emit(
            vec![glyph("neume.podatus.2.liquescent.ligature", 0, Some(Pitch::new(Note::C, 4)))],
            MeiVersion::V4,
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let ncs: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("nc")).collect();

        assert!(ncs[1].children().any(|c| c.has_tag_name("liquescent")));
        assert_eq!(ncs[1].attribute("ligated"), Some("true"));
        assert_eq!(ncs[0].attribute("ligated"), None);
    }

    #[test]
    fn test_curve_angle_and_connection_attributes() {
        let xml = emit(
            vec![glyph(
                "neume.compound.anticlockwise.angled.u2.gapped.d2.extended",
                0,
                Some(Pitch::new(Note::D, 4)),
            )],
            MeiVersion::V4,
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let ncs: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("nc")).collect();
        assert_eq!(ncs.len(), 3);

        assert_eq!(ncs[0].attribute("curve"), Some("a"));
        assert_eq!(ncs[0].attribute("angled"), Some("true"));
        assert_eq!(ncs[0].attribute("con"), None);

        assert_eq!(ncs[1].attribute("con"), Some("g"));
        assert_eq!(ncs[1].attribute("curve"), None);
        assert_eq!(ncs[1].attribute("angled"), None);

        assert_eq!(ncs[2].attribute("con"), Some("e"));
    }

    #[test]
    fn test_looped_connection() {
        let xml = emit(
            vec![glyph("neume.clivis.2.looped", 0, Some(Pitch::new(Note::F, 4)))],
            MeiVersion::V4,
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let ncs: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("nc")).collect();
        assert_eq!(ncs[1].attribute("con"), Some("l"));
        assert_eq!(ncs[0].attribute("con"), None);
    }

    #[test]
    fn test_custos_and_clef_attributes() {
        let xml = emit(
            vec![glyph("clef.f", 0, None), glyph("custos", 500, Some(Pitch::new(Note::G, 3)))],
            MeiVersion::V4,
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let clef = doc.descendants().find(|n| n.has_tag_name("clef")).unwrap();
        let custos = doc.descendants().find(|n| n.has_tag_name("custos")).unwrap();

        assert_eq!(clef.attribute("shape"), Some("F"));
        assert_eq!(custos.attribute("pname"), Some("g"));
        assert_eq!(custos.attribute("oct"), Some("3"));
    }
}
