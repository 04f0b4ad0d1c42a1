use super::*;

#[test]
fn svg_centres_the_escaped_prompt() {
    let svg = placeholder_svg(Canvas::CAPTURE);
    assert!(svg.contains(r#"width="640" height="480""#));
    assert!(svg.contains(r#"x="320" y="240""#));
    assert!(svg.contains("Click &quot;Start Camera&quot; to begin"));
}

#[test]
fn card_is_opaque_black_at_the_edges() {
    let card = render_placeholder(Canvas::CAPTURE).unwrap();
    assert_eq!(card.canvas(), Canvas::CAPTURE);
    assert!(card.premultiplied);
    for (x, y) in [(0, 0), (639, 0), (0, 479), (639, 479), (320, 20)] {
        assert_eq!(card.pixel(x, y), Some([0, 0, 0, 255]));
    }
}

#[test]
fn card_follows_the_canvas_size() {
    let canvas = Canvas::new(64, 32).unwrap();
    let card = render_placeholder(canvas).unwrap();
    assert_eq!((card.width, card.height), (64, 32));
}
