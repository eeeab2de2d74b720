use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Json},
};

use crate::{
    config::get_config,
    dto::profile_dto::UploadResponse,
    error::{Error, Result},
    models::user::Role,
    utils::files::{check_extension, stored_filename, CV_EXTENSIONS, IMAGE_EXTENSIONS},
    AppState,
};

/// First multipart field carrying a filename: (original name, bytes).
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, bytes::Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        return Ok((name, data));
    }
    Err(Error::BadRequest("No se envió ningún archivo".to_string()))
}

async fn persist(subdir: &str, filename: &str, data: &[u8]) -> Result<String> {
    let dir = std::path::Path::new(&get_config().uploads_dir).join(subdir);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(filename), data).await?;
    Ok(format!("/uploads/{}/{}", subdir, filename))
}

#[utoipa::path(
    post,
    path = "/api/usuario/upload-image/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Image stored, user profile updated"),
        (status = 400, description = "Missing file or disallowed extension"),
        (status = 404, description = "Missing or removed user")
    )
)]
#[axum::debug_handler]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;

    let (original_name, data) = read_file_field(&mut multipart).await?;
    let ext = check_extension(&original_name, IMAGE_EXTENSIONS)?;
    let filename = stored_filename(id, &ext);
    let path = persist("images", &filename, &data).await?;

    state.users.set_image_path(id, &path).await?;
    Ok(Json(UploadResponse { path }))
}

#[utoipa::path(
    post,
    path = "/api/candidato/upload-cv/{id}",
    params(("id" = i64, Path, description = "Candidate's user ID")),
    responses(
        (status = 200, description = "CV stored, candidate profile updated"),
        (status = 400, description = "Missing file or disallowed extension"),
        (status = 403, description = "User is not a candidate"),
        (status = 404, description = "Missing or removed user")
    )
)]
#[axum::debug_handler]
pub async fn upload_cv(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;
    if user.role != Role::Candidate {
        return Err(Error::Forbidden(
            "Solo los candidatos pueden subir un CV".to_string(),
        ));
    }

    let (original_name, data) = read_file_field(&mut multipart).await?;
    let ext = check_extension(&original_name, CV_EXTENSIONS)?;
    let filename = stored_filename(id, &ext);
    let path = persist("cvs", &filename, &data).await?;

    if !state.candidates.set_cv_path(id, &path).await? {
        return Err(Error::NotFound(
            "Perfil de candidato no encontrado".to_string(),
        ));
    }
    Ok(Json(UploadResponse { path }))
}
