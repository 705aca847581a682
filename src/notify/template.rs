//! Notification email rendering. Pure string-in, string-out so the template
//! can be tested without a mail transport.

use time::macros::format_description;

use crate::store::ContactRequest;

const PROJECT_TYPE_LABELS: &[(&str, &str)] = &[
    ("web-corporativa", "Web Corporativa"),
    ("e-commerce", "E-commerce"),
    ("sistema-ventas-bd", "Sistema de Ventas y Base de Datos"),
    ("crm-personalizado", "CRM Personalizado"),
    ("landing-page", "Landing Page"),
    ("blog", "Blog/Portfolio"),
    ("app-web", "Aplicación Web"),
    ("marketing-digital", "Marketing Digital"),
    ("community-management", "Community Management"),
];

/// Maps a project-type code to its display label, falling back to the raw
/// code for anything unrecognized.
pub fn project_type_label(code: &str) -> &str {
    PROJECT_TYPE_LABELS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

pub fn render_notification(record: &ContactRequest) -> String {
    let format = format_description!("[day]/[month]/[year] [hour]:[minute]");
    let date = record.created_at.format(format).unwrap_or_default();

    let mut fields = String::new();
    fields.push_str(&field("👤 Nombre:", &escape(&record.name)));
    fields.push_str(&field("📧 Email:", &escape(&record.email)));
    if let Some(phone) = &record.phone {
        fields.push_str(&field("📱 Teléfono:", &escape(phone)));
    }
    if let Some(company) = &record.company {
        fields.push_str(&field("🏢 Empresa:", &escape(company)));
    }
    fields.push_str(&field(
        "🎯 Tipo de Proyecto:",
        &escape(project_type_label(&record.project_type)),
    ));
    if let Some(budget) = &record.budget {
        fields.push_str(&field("💰 Presupuesto:", &escape(budget)));
    }
    if let Some(timeline) = &record.timeline {
        fields.push_str(&field("⏰ Tiempo de Entrega:", &escape(timeline)));
    }
    fields.push_str(&format!(
        "<div class=\"field\"><span class=\"label\">📝 Descripción del Proyecto:</span>\
         <div class=\"description\">{}</div></div>",
        escape(&record.description)
    ));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Nueva Solicitud de Web - LS WEB</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: linear-gradient(135deg, #3b82f6, #1d4ed8); color: white; padding: 20px; text-align: center; }}
        .content {{ background: #f8f9fa; padding: 30px; }}
        .field {{ margin-bottom: 15px; }}
        .label {{ font-weight: bold; color: #2563eb; }}
        .value {{ margin-left: 10px; }}
        .description {{ background: white; padding: 15px; border-left: 4px solid #3b82f6; margin-top: 10px; }}
        .footer {{ text-align: center; padding: 20px; color: #666; font-size: 14px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🌐 LS WEB - Nueva Solicitud</h1>
            <p>Has recibido una nueva solicitud de web personalizada</p>
        </div>
        <div class="content">{fields}</div>
        <div class="footer">
            <p><strong>LS WEB</strong> - Creando experiencias digitales excepcionales</p>
            <p>Fecha: {date}</p>
        </div>
    </div>
</body>
</html>"#
    )
}

fn field(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><span class=\"label\">{label}</span><span class=\"value\">{value}</span></div>"
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactStatus;
    use time::macros::datetime;
    use uuid::Uuid;

    fn record() -> ContactRequest {
        ContactRequest {
            id: Uuid::new_v4(),
            name: "Ana Gomez".into(),
            email: "ana@x.com".into(),
            phone: None,
            company: None,
            project_type: "landing-page".into(),
            budget: None,
            timeline: None,
            description: "Necesito una landing page para mi negocio".into(),
            created_at: datetime!(2024-05-10 12:30:00 UTC),
            status: ContactStatus::Pending,
        }
    }

    #[test]
    fn known_project_types_get_labels_and_unknown_fall_through() {
        assert_eq!(project_type_label("e-commerce"), "E-commerce");
        assert_eq!(project_type_label("blog"), "Blog/Portfolio");
        assert_eq!(project_type_label("something-else"), "something-else");
    }

    #[test]
    fn optional_sections_render_only_when_present() {
        let bare = render_notification(&record());
        assert!(!bare.contains("Teléfono"));
        assert!(!bare.contains("Empresa"));
        assert!(!bare.contains("Presupuesto"));

        let mut full = record();
        full.phone = Some("+54 11 5555-0000".into());
        full.company = Some("Gomez SRL".into());
        full.budget = Some("USD 500".into());
        full.timeline = Some("1 mes".into());
        let html = render_notification(&full);
        assert!(html.contains("Teléfono"));
        assert!(html.contains("Gomez SRL"));
        assert!(html.contains("USD 500"));
        assert!(html.contains("Tiempo de Entrega"));
    }

    #[test]
    fn body_carries_mapped_project_type_and_date() {
        let html = render_notification(&record());
        assert!(html.contains("Landing Page"));
        assert!(html.contains("Fecha: 10/05/2024 12:30"));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let mut rec = record();
        rec.name = "<script>alert(1)</script>".into();
        let html = render_notification(&rec);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
