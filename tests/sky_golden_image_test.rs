#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_clear_to_the_sky_colour() {
    use common::test_utils::{SceneProbe, assert_pixel_close, expected_rgb, rgb_at};
    use ring_flight::{GameSession, context::InitContext, flow::ImageTestResult, scene};

    golden_image_test!(|_: InitContext| SceneProbe {
        scene: None,
        session: GameSession::new(0),
        validate: |ctx, texture| {
            let sky = expected_rgb(ctx, scene::SKY);
            let (width, height) = texture.dimensions();
            for (x, y) in [(0, 0), (width / 2, height / 2), (width - 1, height - 1)] {
                assert_pixel_close(rgb_at(ctx, texture, x, y), sky);
            }
            Ok(ImageTestResult::Passed)
        },
    });
}
