use bloombox_signals::{ElementSample, PageInput, Pipeline, RenderedSample, RootProperty};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_page(sections: usize) -> String {
    let mut html = String::from(
        r##"<html><head><title>Acme | Home</title>
        <meta name="theme-color" content="#0A66C2">
        <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700" rel="stylesheet">
        <style>:root{--brand-color:#0A66C2;--accent-color:#FF6600;--font-heading:'Playfair Display',serif}
        body{color:#222;background:#fff;font-family:Inter,system-ui,sans-serif}</style></head><body>
        <header><img src="/static/logo.svg" alt="Acme"></header>"##,
    );
    for i in 0..sections {
        html.push_str(&format!(
            r#"<section class="s{i}" style="background-color:rgb({r}, 120, 200);color:#333">
            <h2 style="font-family:'Playfair Display', Georgia, serif">Section {i}</h2>
            <p style="color:#{i:06X}">Body text</p></section>"#,
            r = i % 256
        ));
    }
    html.push_str("</body></html>");
    html
}

fn synthetic_sample(elements: usize) -> RenderedSample {
    RenderedSample {
        root_properties: vec![RootProperty {
            name: "--brand-color".to_string(),
            value: "rgb(10, 102, 194)".to_string(),
        }],
        elements: (0..elements)
            .map(|i| ElementSample {
                tag: if i % 10 == 0 { "NAV" } else { "DIV" }.to_string(),
                class_name: format!("block-{i}"),
                width: 320.0,
                height: 48.0,
                display: "block".to_string(),
                visibility: "visible".to_string(),
                background_color: Some(format!("rgb({}, 34, 51)", i % 256)),
                color: Some("rgb(34, 34, 34)".to_string()),
                font_family: Some("Inter, sans-serif".to_string()),
                ..Default::default()
            })
            .collect(),
    }
}

fn bench_static_page(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let page = PageInput::from_html(synthetic_page(200)).with_base_url("https://acme.com");

    c.bench_function("pipeline_static_200_sections", |b| {
        b.iter(|| pipeline.run(black_box(&page)))
    });
}

fn bench_rendered_page(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let page = PageInput::from_html(synthetic_page(50))
        .with_base_url("https://acme.com")
        .with_rendered(synthetic_sample(500));

    c.bench_function("pipeline_rendered_500_elements", |b| {
        b.iter(|| pipeline.run(black_box(&page)))
    });
}

criterion_group!(benches, bench_static_page, bench_rendered_page);
criterion_main!(benches);
