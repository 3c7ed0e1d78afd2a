use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use wistia_client::{Customization, WistiaClient};

use super::{non_empty, Resource};
use crate::error::{Action, ProviderError, Result};
use crate::schema::{Attribute, AttributeType, ResourceSchema};

const RESOURCE: &str = "media customization";

macro_rules! customization_state {
    ($($field:ident => $description:literal),+ $(,)?) => {
        /// Attribute state of a `wistia_media_customization`.
        ///
        /// An option set to the empty string is treated as unset and left
        /// out of the request, so Wistia falls back to its default.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct CustomizationState {
            /// Resource id, the media's hashed id.
            pub id: String,
            pub media_id: String,
            $(pub $field: Option<String>,)+
        }

        impl CustomizationState {
            fn to_entity(&self) -> Customization {
                Customization {
                    media_id: self.resource_id().to_string(),
                    $($field: non_empty(self.$field.as_deref()).map(str::to_string),)+
                }
            }
        }

        impl From<Customization> for CustomizationState {
            fn from(customization: Customization) -> Self {
                Self {
                    id: customization.media_id.clone(),
                    media_id: customization.media_id,
                    $($field: customization.$field,)+
                }
            }
        }

        fn option_attributes() -> Vec<Attribute> {
            vec![$(Attribute::optional(stringify!($field), AttributeType::String, $description),)+]
        }
    };
}

customization_state! {
    auto_play => "Start playback as soon as the player loads.",
    controls_visible_on_load => "Show the controls before playback starts.",
    copy_link_and_thumbnail_enabled => "Allow copying a link with thumbnail from the player.",
    do_not_track => "Disable viewer tracking.",
    email => "Email address attributed to plays.",
    end_video_behavior => "What happens at the end: default, reset or loop.",
    fake_fullscreen => "Fill the window instead of using native fullscreen.",
    fit_strategy => "How the video fits its container: contain, cover, fill or none.",
    fullscreen_button => "Show the fullscreen button.",
    fullscreen_on_rotate_to_landscape => "Go fullscreen when a mobile device rotates to landscape.",
    google_analytics => "Send events to Google Analytics.",
    muted => "Start muted.",
    playback_rate_control => "Show the playback speed control.",
    playbar => "Show the playbar.",
    play_button => "Show the big play button.",
    player_color => "Player accent color as hex RGB.",
    playlist_loop => "Loop the playlist.",
    playsinline => "Play inline on mobile devices.",
    play_suspended_off_screen => "Pause when the player scrolls off screen.",
    preload => "Preload strategy: metadata, auto or none.",
    quality_control => "Show the quality selector.",
    quality_max => "Highest quality offered, e.g. 1080.",
    quality_min => "Lowest quality offered, e.g. 360.",
    resumable => "Resume where the viewer left off.",
    seo => "Add SEO metadata to the embed.",
    settings_control => "Show the settings control.",
    silent_auto_play => "Autoplay muted when audible autoplay is blocked.",
    small_play_button => "Show the small play button in the control bar.",
    still_url => "Thumbnail image URL.",
    time => "Start time in seconds.",
    video_foam => "Resize the player to its parent's width.",
    volume => "Initial volume between 0 and 1.",
    volume_control => "Show the volume control.",
    wmode => "Flash window mode.",
}

impl CustomizationState {
    fn resource_id(&self) -> &str {
        if self.media_id.is_empty() {
            &self.id
        } else {
            &self.media_id
        }
    }
}

/// `wistia_media_customization`
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomizationResource;

#[async_trait]
impl Resource for CustomizationResource {
    type State = CustomizationState;

    fn type_name(&self) -> &'static str {
        "wistia_media_customization"
    }

    fn schema(&self) -> ResourceSchema {
        let mut attributes = vec![Attribute::required(
            "media_id",
            AttributeType::String,
            "Hashed id of the customized media.",
        )];
        attributes.extend(option_attributes());
        ResourceSchema {
            type_name: "wistia_media_customization",
            description: "Embed player options of a Wistia media.",
            attributes,
        }
    }

    async fn create(
        &self,
        client: &WistiaClient,
        desired: &CustomizationState,
    ) -> Result<CustomizationState> {
        let customization = client
            .customizations()
            .create(&desired.to_entity())
            .await
            .map_err(ProviderError::operation(Action::Create, RESOURCE))?;
        info!(media_id = %customization.media_id, "Created Wistia media customization");
        Ok(customization.into())
    }

    async fn read(
        &self,
        client: &WistiaClient,
        current: &CustomizationState,
    ) -> Result<CustomizationState> {
        client
            .customizations()
            .get(current.resource_id())
            .await
            .map(Into::into)
            .map_err(ProviderError::operation(Action::Read, RESOURCE))
    }

    async fn update(
        &self,
        client: &WistiaClient,
        desired: &CustomizationState,
    ) -> Result<CustomizationState> {
        client
            .customizations()
            .update(&desired.to_entity())
            .await
            .map(Into::into)
            .map_err(ProviderError::operation(Action::Update, RESOURCE))
    }

    async fn delete(&self, client: &WistiaClient, current: &CustomizationState) -> Result<()> {
        client
            .customizations()
            .delete(current.resource_id())
            .await
            .map_err(ProviderError::operation(Action::Delete, RESOURCE))
    }
}
