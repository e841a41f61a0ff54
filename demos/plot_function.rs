use figura::geometry::{PlotMapper, Sampler, SamplerConfig, segments_to_path_data};
use figura::{Range, RenderConfig};
use glam::dvec2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let expression = std::env::args().nth(1).unwrap_or_else(|| "tan(x)".to_string());
    let domain = Range::new(-6.0, 6.0);
    let config = RenderConfig::default();
    let mapper = PlotMapper::new(domain, Range::symmetric(4.0), config.viewport);

    let sampler = Sampler::new(mapper).with_config(SamplerConfig::default().with_resolution(400));
    let segments = sampler.sample_expression(&expression, domain);
    eprintln!("{}: {} segment(s)", expression, segments.len());

    let area = mapper.plot_area();
    let origin = mapper.origin_pixel();
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">\n",
        config.viewport.width, config.viewport.height
    ));
    for (_, x) in mapper.x.tick_pixels(1.0) {
        svg.push_str(&format!(
            "  <line x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\" stroke=\"{}\"/>\n",
            area.top,
            area.bottom,
            config.color("grid")
        ));
    }
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>\n",
        area.left,
        origin.y,
        area.right,
        origin.y,
        config.color("axis")
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>\n",
        origin.x,
        area.top,
        origin.x,
        area.bottom,
        config.color("axis")
    ));
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
        segments_to_path_data(&segments),
        config.color("curve")
    ));
    let label = mapper.to_pixel(dvec2(domain.min, 3.5));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" fill=\"{}\">y = {}</text>\n",
        label.x + 4.0,
        label.y,
        config.color("text"),
        expression
    ));
    svg.push_str("</svg>\n");
    print!("{}", svg);
}
