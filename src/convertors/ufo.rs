use crate::{
    common::Lib,
    font::{Groups, Info, Kerning},
    shape::{Component, Path, Shape},
    Font, Glyph, MergeError,
};
use std::collections::HashSet;

const GLYPH_ORDER: &str = "public.glyphOrder";
const POSTSCRIPT_NAMES: &str = "public.postscriptNames";

fn stash<T: serde::Serialize>(value: &T) -> Result<Lib, MergeError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(Lib::from_map(map)),
        serde_json::Value::Null => Ok(Lib::default()),
        other => Err(MergeError::Lib(serde::ser::Error::custom(format!(
            "expected a dictionary, found {}",
            other
        )))),
    }
}

fn unstash<T: serde::de::DeserializeOwned + Default>(lib: &Lib) -> Result<T, MergeError> {
    if lib.is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(lib.to_value())?)
}

pub fn load<T: AsRef<std::path::Path>>(path: T) -> Result<Font, MergeError> {
    log::debug!("Loading UFO {}", path.as_ref().display());
    let ufo = norad::Font::load(&path)?;
    let mut font = Font::new();
    load_glyphs(&mut font, &ufo)?;
    font.production_names = ufo
        .lib
        .get(POSTSCRIPT_NAMES)
        .and_then(|x| x.as_dictionary())
        .map(|names| {
            names
                .iter()
                .flat_map(|(k, v)| v.as_string().map(|v| (k.to_string(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();
    font.lib = stash(&ufo.lib)?;
    // Both of these are regenerated from the model on save
    font.lib.remove(GLYPH_ORDER);
    font.lib.remove(POSTSCRIPT_NAMES);
    font.info = load_info(&ufo.font_info)?;
    font.kerning = load_kerning(&ufo.kerning);
    font.groups = load_groups(&ufo.groups);
    font.features = ufo.features.clone();
    Ok(font)
}

pub(crate) fn load_glyphs(font: &mut Font, ufo: &norad::Font) -> Result<(), MergeError> {
    if ufo.iter_layers().count() > 1 {
        log::warn!("Only the default layer of a UFO is carried through; other layers are dropped");
    }
    let glyphorder: Vec<String> = ufo
        .lib
        .get(GLYPH_ORDER)
        .and_then(|x| x.as_array())
        .map(|x| {
            x.iter()
                .flat_map(|x| x.as_string())
                .map(|x| x.to_string())
                .collect()
        })
        .unwrap_or_default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut order: Vec<String> = vec![];
    for name in glyphorder {
        if ufo.get_glyph(name.as_str()).is_some() && seen.insert(name.clone()) {
            order.push(name);
        }
    }
    // Glyphs the stored order does not mention go last
    for name in ufo.iter_names() {
        if seen.insert(name.to_string()) {
            order.push(name.to_string());
        }
    }

    for glyphname in order {
        if let Some(glyph) = ufo.get_glyph(glyphname.as_str()) {
            font.glyphs.push(load_glyph(glyph)?);
        }
    }
    Ok(())
}

pub(crate) fn load_glyph(glyph: &norad::Glyph) -> Result<Glyph, MergeError> {
    let mut shapes = vec![];
    for comp in &glyph.components {
        shapes.push(Shape::Component(load_component(comp)));
    }
    for contour in &glyph.contours {
        shapes.push(Shape::Path(load_path(contour)));
    }
    Ok(Glyph {
        name: glyph.name().to_string(),
        codepoints: glyph.codepoints.iter().map(|x| x as u32).collect(),
        width: glyph.width,
        shapes,
        anchors: glyph.anchors.iter().map(|x| x.into()).collect(),
        lib: stash(&glyph.lib)?,
    })
}

pub(crate) fn load_component(c: &norad::Component) -> Component {
    let t = c.transform;
    Component {
        reference: c.base.to_string().into(),
        transform: kurbo::Affine::new([
            t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
        ]),
    }
}

pub(crate) fn load_path(c: &norad::Contour) -> Path {
    Path {
        nodes: c.points.iter().map(|p| p.into()).collect(),
        closed: c
            .points
            .first()
            .is_none_or(|v| v.typ != norad::PointType::Move),
    }
}

pub(crate) fn load_kerning(kerning: &norad::Kerning) -> Kerning {
    let mut pairs = Kerning::new();
    for (left, right_dict) in kerning.iter() {
        for (right, value) in right_dict.iter() {
            pairs.insert((left.to_string(), right.to_string()), value.round() as i32);
        }
    }
    pairs
}

pub(crate) fn load_groups(groups: &norad::Groups) -> Groups {
    groups
        .iter()
        .map(|(name, members)| {
            (
                name.to_string(),
                members.iter().map(|x| x.to_string()).collect(),
            )
        })
        .collect()
}

pub(crate) fn load_info(info: &norad::FontInfo) -> Result<Info, MergeError> {
    Ok(Info {
        family_name: info.family_name.clone(),
        style_name: info.style_name.clone(),
        version_major: info.version_major,
        version_minor: info.version_minor,
        copyright: info.copyright.clone(),
        ascender: info.ascender,
        descender: info.descender,
        x_height: info.x_height,
        cap_height: info.cap_height,
        stash: stash(info)?,
    })
}

pub fn save(font: &Font, path: impl AsRef<std::path::Path>) -> Result<(), MergeError> {
    log::info!("Saving UFO {}", path.as_ref().display());
    let ufo = as_norad(font)?;
    ufo.save(path)?;
    Ok(())
}

pub fn as_norad(font: &Font) -> Result<norad::Font, MergeError> {
    let mut ufo = norad::Font::new();
    let mut lib = font.lib.clone();
    lib.insert(GLYPH_ORDER.to_string(), font.glyph_order().into());
    if !font.production_names.is_empty() {
        let names: serde_json::Map<String, serde_json::Value> = font
            .production_names
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into()))
            .collect();
        lib.insert(POSTSCRIPT_NAMES.to_string(), names.into());
    }
    ufo.lib = unstash(&lib)?;

    let layer = ufo.default_layer_mut();
    for g in font.glyphs.iter() {
        layer.insert_glyph(save_glyph(g)?);
    }
    for (group_name, members) in font.groups.iter() {
        let members: Result<Vec<norad::Name>, norad::error::NamingError> =
            members.iter().map(|x| norad::Name::new(x)).collect();
        ufo.groups.insert(norad::Name::new(group_name)?, members?);
    }
    save_kerning(&mut ufo.kerning, &font.kerning)?;
    ufo.font_info = save_info(&font.info)?;
    ufo.features = font.features.clone();
    Ok(ufo)
}

fn save_glyph(glyph: &Glyph) -> Result<norad::Glyph, MergeError> {
    let mut norad_glyph = norad::Glyph::new(glyph.name.as_str());
    norad_glyph.width = glyph.width;
    norad_glyph.codepoints =
        norad::Codepoints::new(glyph.codepoints.iter().flat_map(|&x| char::from_u32(x)));
    for shape in &glyph.shapes {
        match shape {
            Shape::Path(p) => norad_glyph.contours.push(save_path(p)),
            Shape::Component(c) => norad_glyph.components.push(save_component(c)?),
        }
    }
    norad_glyph.anchors = glyph
        .anchors
        .iter()
        .map(norad::Anchor::try_from)
        .collect::<Result<Vec<_>, MergeError>>()?;
    norad_glyph.lib = unstash(&glyph.lib)?;
    Ok(norad_glyph)
}

pub(crate) fn save_component(c: &Component) -> Result<norad::Component, MergeError> {
    let t = c.transform.as_coeffs();
    Ok(norad::Component::new(
        norad::Name::new(c.reference.as_str())?,
        norad::AffineTransform {
            x_scale: t[0],
            xy_scale: t[1],
            yx_scale: t[2],
            y_scale: t[3],
            x_offset: t[4],
            y_offset: t[5],
        },
        None,
    ))
}

pub(crate) fn save_path(p: &Path) -> norad::Contour {
    let points: Vec<norad::ContourPoint> = p.nodes.iter().map(|n| n.into()).collect();
    norad::Contour::new(points, None)
}

pub(crate) fn save_kerning(
    norad_kerning: &mut norad::Kerning,
    kerning: &Kerning,
) -> Result<(), MergeError> {
    for ((left, right), value) in kerning.iter() {
        norad_kerning
            .entry(norad::Name::new(left)?)
            .or_default()
            .insert(norad::Name::new(right)?, *value as f64);
    }
    Ok(())
}

pub(crate) fn save_info(info: &Info) -> Result<norad::FontInfo, MergeError> {
    let mut fontinfo: norad::FontInfo = unstash(&info.stash)?;
    fontinfo.family_name = info.family_name.clone();
    fontinfo.style_name = info.style_name.clone();
    fontinfo.version_major = info.version_major;
    fontinfo.version_minor = info.version_minor;
    fontinfo.copyright = info.copyright.clone();
    fontinfo.ascender = info.ascender;
    fontinfo.descender = info.descender;
    fontinfo.x_height = info.x_height;
    fontinfo.cap_height = info.cap_height;
    Ok(fontinfo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Anchor, Node, NodeType};
    use rstest::rstest;
    use pretty_assertions::assert_eq;

    fn font() -> Font {
        let mut a = Glyph::new("a");
        a.codepoints = vec![0x61];
        a.width = 500.0;
        a.anchors.push(Anchor::new("top", 250.0, 500.0));
        a.shapes.push(Shape::Path(Path {
            nodes: vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(0.0, 200.0, NodeType::OffCurve),
                Node::new(100.0, 200.0, NodeType::OffCurve),
                Node::new(100.0, 0.0, NodeType::Curve),
            ],
            closed: true,
        }));
        let mut b = Glyph::new("b");
        b.codepoints = vec![0x62];
        b.shapes.push(Shape::Component(Component::new(
            "a",
            kurbo::Affine::new([-1.0, 0.0, 0.0, 1.0, 500.0, 0.0]),
        )));

        let mut font = Font::new();
        // Deliberately not alphabetical
        font.glyphs.push(b);
        font.glyphs.push(a);
        font.kerning.insert(("a".into(), "b".into()), -20);
        font.groups
            .insert("public.kern1.a".into(), vec!["a".into(), "b".into()]);
        font.production_names.insert("a".into(), "uni0061".into());
        font.info.x_height = Some(480.0);
        font.info.version_major = Some(1);
        font.info.version_minor = Some(5);
        font.features = "languagesystem DFLT dflt;\n".into();
        font
    }

    #[test]
    fn test_round_trip() -> Result<(), MergeError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Test.ufo");
        let original = font();
        save(&original, &path)?;
        let loaded = crate::load(&path)?;

        assert_eq!(loaded.glyph_order(), vec!["b", "a"]);
        assert_eq!(loaded.kerning, original.kerning);
        assert_eq!(loaded.groups, original.groups);
        assert_eq!(loaded.production_names, original.production_names);
        assert_eq!(loaded.info.x_height, Some(480.0));
        assert_eq!(loaded.info.version_major, Some(1));
        assert_eq!(loaded.info.version_minor, Some(5));
        assert_eq!(loaded.features, original.features);
        assert_eq!(loaded.source, Some(path));

        let a = loaded.glyphs.get("a").cloned().unwrap_or_default();
        let original_a = original.glyphs.get("a").cloned().unwrap_or_default();
        assert_eq!(a.codepoints, vec![0x61]);
        assert_eq!(a.width, 500.0);
        assert_eq!(a.anchors, original_a.anchors);
        assert_eq!(a.shapes, original_a.shapes);

        let b = loaded.glyphs.get("b").cloned().unwrap_or_default();
        assert_eq!(
            b.components().map(|c| c.transform).collect::<Vec<_>>(),
            vec![kurbo::Affine::new([-1.0, 0.0, 0.0, 1.0, 500.0, 0.0])]
        );
        Ok(())
    }

    fn write_ufo(path: &std::path::Path, order: Option<&[&str]>) -> Result<(), MergeError> {
        let mut ufo = norad::Font::new();
        for name in ["c", "a", "b"] {
            ufo.default_layer_mut().insert_glyph(norad::Glyph::new(name));
        }
        if let Some(order) = order {
            let mut lib = Lib::default();
            lib.insert(GLYPH_ORDER.to_string(), order.to_vec().into());
            ufo.lib = unstash(&lib)?;
        }
        ufo.save(path)?;
        Ok(())
    }

    #[rstest]
    #[case(Some(&["b", "c", "a"][..]), vec!["b", "c", "a"])]
    #[case(None, vec!["a", "b", "c"])]
    #[case(Some(&["b", "ghost", "b"][..]), vec!["b", "a", "c"])]
    #[case(Some(&[][..]), vec!["a", "b", "c"])]
    fn test_stored_glyph_order(
        #[case] order: Option<&[&str]>,
        #[case] expected: Vec<&str>,
    ) -> Result<(), MergeError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Order.ufo");
        write_ufo(&path, order)?;
        assert_eq!(load(&path)?.glyph_order(), expected);
        Ok(())
    }

    #[test]
    fn test_unreadable_info_stash_is_an_error() {
        let mut font = font();
        font.info
            .stash
            .insert("unitsPerEm".to_string(), "many".into());
        assert!(matches!(save_info(&font.info), Err(MergeError::Lib(_))));
    }
}
