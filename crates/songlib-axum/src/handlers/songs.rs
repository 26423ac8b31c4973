//! Song handlers - CRUD, search and paginated lyrics.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};

use crate::dto::songs::parse_song_id;
use crate::dto::{
    ApiResponse, CreateSongRequest, CreatedSong, LyricsPageQuery, SongDto, SongListQuery,
    UpdateSongRequest, VerseDto,
};
use crate::error::HttpError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, HttpError>;

/// Create a song, enriched from the detail service.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<CreatedSong> {
    let Json(req) = body?;
    let id = state.core.songs().create(&req.group, &req.title).await?;
    Ok(Json(ApiResponse::new("song created", CreatedSong { id })))
}

/// Search songs by the query string filters.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<SongListQuery>, QueryRejection>,
) -> ApiResult<Vec<SongDto>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let songs = state.core.songs().search(&filter).await?;
    Ok(Json(ApiResponse::new(
        "songs retrieved",
        songs.into_iter().map(SongDto::from).collect(),
    )))
}

/// Get a single song by ID.
pub async fn get(State(state): State<AppState>, Path(song_id): Path<String>) -> ApiResult<SongDto> {
    let id = parse_song_id(&song_id)?;
    let song = state.core.songs().get(id).await?;
    Ok(Json(ApiResponse::new("song retrieved", song.into())))
}

/// Apply a partial update; the song ID travels in the body.
pub async fn update(
    State(state): State<AppState>,
    body: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(req) = body?;
    let update = req.into_update()?;
    state.core.songs().update(&update).await?;
    Ok(Json(ApiResponse::new("song updated", ())))
}

/// Delete a song and its lyrics.
pub async fn remove(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
) -> ApiResult<()> {
    let id = parse_song_id(&song_id)?;
    state.core.songs().delete(id).await?;
    Ok(Json(ApiResponse::new("song deleted", ())))
}

/// One page of a song's lyrics.
pub async fn lyrics(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
    query: Result<Query<LyricsPageQuery>, QueryRejection>,
) -> ApiResult<Vec<VerseDto>> {
    let id = parse_song_id(&song_id)?;
    let Query(query) = query?;
    let page = query.into_page()?;
    let verses = state.core.songs().lyrics_page(id, page).await?;
    Ok(Json(ApiResponse::new(
        "lyrics retrieved",
        verses.into_iter().map(VerseDto::from).collect(),
    )))
}
