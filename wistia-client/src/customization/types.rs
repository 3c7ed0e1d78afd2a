//! Customization wire types

use serde::{Deserialize, Serialize};

use crate::serde_helpers::lenient_string;

/// Declares [`Customization`] from a list of player options.
///
/// Every option is an optional string sent under its camelCase name and
/// left out of the payload entirely while unset, so Wistia keeps its own
/// default instead of receiving an empty value.
macro_rules! customization {
    ($($(#[$doc:meta])* $field:ident),+ $(,)?) => {
        /// Per-media embed player options.
        ///
        /// One record per media, addressed by the media's hashed id.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Customization {
            /// Hashed id of the customized media. Not part of the payload.
            #[serde(skip)]
            pub media_id: String,
            $(
                $(#[$doc])*
                #[serde(
                    default,
                    deserialize_with = "lenient_string",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $field: Option<String>,
            )+
        }

        impl Customization {
            /// Field names of every supported option, in declaration order.
            pub const OPTION_NAMES: &'static [&'static str] = &[
                $(stringify!($field)),+
            ];
        }
    };
}

customization! {
    auto_play,
    controls_visible_on_load,
    copy_link_and_thumbnail_enabled,
    do_not_track,
    email,
    end_video_behavior,
    fake_fullscreen,
    fit_strategy,
    fullscreen_button,
    fullscreen_on_rotate_to_landscape,
    google_analytics,
    muted,
    playback_rate_control,
    playbar,
    play_button,
    /// Hex RGB, e.g. `ff0000`.
    player_color,
    playlist_loop,
    playsinline,
    play_suspended_off_screen,
    preload,
    quality_control,
    quality_max,
    quality_min,
    resumable,
    seo,
    settings_control,
    silent_auto_play,
    small_play_button,
    /// Absolute URL of the thumbnail image.
    still_url,
    time,
    video_foam,
    volume,
    volume_control,
    wmode,
}

impl Customization {
    #[must_use]
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_options_are_omitted() {
        let customization = Customization {
            player_color: Some("ff0000".to_string()),
            auto_play: Some("true".to_string()),
            ..Customization::new("m1")
        };
        let value = serde_json::to_value(&customization).unwrap();
        assert_eq!(value, json!({"playerColor": "ff0000", "autoPlay": "true"}));
    }

    #[test]
    fn test_empty_customization_serializes_to_empty_object() {
        let value = serde_json::to_value(Customization::new("m1")).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let customization = Customization {
            fullscreen_on_rotate_to_landscape: Some("false".to_string()),
            play_suspended_off_screen: Some("false".to_string()),
            copy_link_and_thumbnail_enabled: Some("true".to_string()),
            still_url: Some("https://example.com/still.jpg".to_string()),
            playsinline: Some("true".to_string()),
            wmode: Some("transparent".to_string()),
            ..Customization::default()
        };
        let value = serde_json::to_value(&customization).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "fullscreenOnRotateToLandscape",
            "playSuspendedOffScreen",
            "copyLinkAndThumbnailEnabled",
            "stillUrl",
            "playsinline",
            "wmode",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_decode_scalars_as_strings() {
        let customization: Customization = serde_json::from_value(json!({
            "autoPlay": true,
            "volume": 0.5,
            "playerColor": "00ff00",
            "plugin": {"chapters": {"on": true}}
        }))
        .unwrap();
        assert_eq!(customization.auto_play.as_deref(), Some("true"));
        assert_eq!(customization.volume.as_deref(), Some("0.5"));
        assert_eq!(customization.player_color.as_deref(), Some("00ff00"));
        assert_eq!(customization.media_id, "");
    }

    #[test]
    fn test_option_names() {
        assert_eq!(Customization::OPTION_NAMES.len(), 34);
        assert!(Customization::OPTION_NAMES.contains(&"video_foam"));
    }

    #[test]
    fn test_roundtrip() {
        let customization = Customization {
            auto_play: Some("true".to_string()),
            end_video_behavior: Some("loop".to_string()),
            quality_max: Some("1080".to_string()),
            ..Customization::default()
        };
        let encoded = serde_json::to_string(&customization).unwrap();
        let decoded: Customization = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, customization);
    }
}
