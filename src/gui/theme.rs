use std::collections::BTreeSet;

use eframe::egui::text::{LayoutJob, TextFormat};
use eframe::egui::{Color32, FontId, RichText};

use crate::highlight::{Segment, highlight_key_points};

pub const BACKGROUND: Color32 = Color32::from_rgb(0xf0, 0xf4, 0xf7);
pub const LABEL: Color32 = Color32::from_rgb(0x34, 0x49, 0x5e);
pub const TEXT: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
pub const OUTPUT_FILL: Color32 = Color32::from_rgb(0xec, 0xf0, 0xf1);
pub const ENTITY_FILL: Color32 = Color32::from_rgb(0xf9, 0xe7, 0x9f);

pub const BLUE: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const GREEN: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
pub const ORANGE: Color32 = Color32::from_rgb(0xe6, 0x7e, 0x22);
pub const PURPLE: Color32 = Color32::from_rgb(0x9b, 0x59, 0xb6);
pub const RED: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);

pub const BODY_SIZE: f32 = 14.0;

pub fn heading(text: &str) -> RichText {
    RichText::new(text).size(20.0).strong().color(LABEL)
}

pub fn label(text: &str) -> RichText {
    RichText::new(text).size(15.0).color(LABEL)
}

pub fn button_text(text: &str) -> RichText {
    RichText::new(text).size(15.0).strong().color(Color32::WHITE)
}

/// Lays out `text` with every entity occurrence on a highlight background.
pub fn highlighted_job(text: &str, entities: &BTreeSet<String>) -> LayoutJob {
    let plain = TextFormat {
        font_id: FontId::proportional(BODY_SIZE),
        color: TEXT,
        ..Default::default()
    };
    let marked = TextFormat {
        background: ENTITY_FILL,
        ..plain.clone()
    };

    let mut job = LayoutJob::default();
    for segment in highlight_key_points(text, entities).segments() {
        match segment {
            Segment::Plain(s) => job.append(s, 0.0, plain.clone()),
            Segment::Entity(s) => job.append(s, 0.0, marked.clone()),
        }
    }
    job
}
